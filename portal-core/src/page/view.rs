//! 页面的视图模型：面板、网络列表、表单和页脚。

use crate::structs::Network;

/// 三个互斥的面板
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    /// 初始提示，带 "scan" 按钮
    #[default]
    Hero,
    /// 等待 /scan 返回
    Loading,
    /// 网络列表，带 "refresh" 按钮
    Found,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Ssid,
    Password,
}

/// 把 RSSI（dBm）映射为 0 到 4 格信号
pub fn signal_level(rssi: i32) -> u8 {
    match rssi {
        r if r >= -50 => 4,
        r if r >= -60 => 3,
        r if r >= -70 => 2,
        r if r >= -80 => 1,
        _ => 0,
    }
}

/// 单个网络对应的列表项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItemView {
    /// 可见的 SSID 文本
    pub ssid: String,
    /// 选择按钮上的 `data-ssid`，点击时复制到表单
    pub data_ssid: String,
    /// 0..=4
    pub signal_level: u8,
    pub show_secure: bool,
    pub show_not_secure: bool,
}

impl ListItemView {
    pub fn from_network(network: &Network) -> Self {
        Self {
            ssid: network.ssid.clone(),
            data_ssid: network.ssid.clone(),
            signal_level: signal_level(network.rssi),
            show_secure: network.secure,
            show_not_secure: !network.secure,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    pub ssid: String,
    pub password: String,
    pub focus: Option<FormField>,
    /// 密码框已平滑滚动到视口中央
    pub password_scrolled_into_view: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterView {
    pub year: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageView {
    pub panel: Panel,
    pub list: Vec<ListItemView>,
    pub form: FormView,
    pub footer: Vec<FooterView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_level_thresholds() {
        let cases = [
            (-20, 4),
            (-50, 4),
            (-51, 3),
            (-60, 3),
            (-61, 2),
            (-70, 2),
            (-71, 1),
            (-80, 1),
            (-81, 0),
            (-100, 0),
        ];
        for (rssi, level) in cases {
            assert_eq!(signal_level(rssi), level, "rssi {rssi}");
        }
    }

    #[test]
    fn secure_network_hides_not_secure_indicator() {
        let item = ListItemView::from_network(&Network {
            ssid: "Home".into(),
            rssi: -45,
            secure: true,
        });
        assert!(item.show_secure);
        assert!(!item.show_not_secure);
    }

    #[test]
    fn open_network_hides_secure_indicator() {
        let item = ListItemView::from_network(&Network {
            ssid: "Cafe".into(),
            rssi: -75,
            secure: false,
        });
        assert!(!item.show_secure);
        assert!(item.show_not_secure);
        assert_eq!(item.data_ssid, "Cafe");
        assert_eq!(item.signal_level, 1);
    }
}
