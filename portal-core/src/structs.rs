use serde::{Deserialize, Serialize};

/// 表示扫描到的单个 Wi-Fi 网络
///
/// SSID 不保证唯一，也可能为空字符串；列表顺序以服务端返回为准。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub ssid: String,
    pub rssi: i32,    // 信号强度，单位 dBm（负数，越接近 0 越强）
    pub secure: bool, // 是否需要密码
}

/// /setup/wifi 的请求体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiCredentials {
    pub ssid: String,
    pub password: String,
}
