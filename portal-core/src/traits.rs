use crate::structs::{Network, WifiCredentials};
use async_trait::async_trait;
use std::borrow::Cow;

// 在这里定义所有后端、前端和页面依赖的 trait。

/// 前端资源提供者接口。
#[async_trait]
pub trait UiAssetProvider: Send + Sync {
    /// Retrieves a single UI asset.
    ///
    /// # Arguments
    /// * `path` - The path to the asset (e.g., "style.css").
    ///
    /// # Returns
    /// The asset's content and its MIME type, or `Error::AssetNotFound`.
    async fn get_asset(&self, path: &str) -> crate::Result<(Cow<'static, [u8]>, String)>;
}

/// 设备端扫描能力：每次调用都执行一次实时扫描
#[async_trait]
pub trait WifiScanner: Send + Sync {
    async fn scan(&self) -> crate::Result<Vec<Network>>;
}

/// 持久化 STA（客户端模式）凭据
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn save_sta_config(&self, credentials: &WifiCredentials) -> crate::Result<()>;
}

/// 页面控制器访问的两个远端接口：`GET /scan` 与 `POST /setup/wifi`。
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// 获取网络列表，原样返回，不做校验
    async fn fetch_networks(&self) -> crate::Result<Vec<Network>>;

    /// 提交凭据，不检查响应内容
    async fn submit_credentials(&self, credentials: &WifiCredentials) -> crate::Result<()>;
}

/// 页脚年份的时间来源，测试中可替换为固定值
pub trait Clock: Send + Sync {
    fn current_year(&self) -> i32;
}

/// 使用本地时间的时钟
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        use chrono::Datelike;
        chrono::Local::now().year()
    }
}
