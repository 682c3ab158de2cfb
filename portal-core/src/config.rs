use crate::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// 编译时嵌入的默认配置
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../configs.toml");

/// 顶层应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ap: ApConfig,
    pub portal: PortalConfig,
}

/// AP 热点与 Web 服务器监听配置
#[derive(Debug, Clone)]
pub struct ApConfig {
    pub ssid: String,
    pub bind_addr: SocketAddr,
    pub interface_name: String,
}

/// 扫描器选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerKind {
    Mock,
    WpaCli,
}

impl FromStr for ScannerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mock" => Ok(ScannerKind::Mock),
            "wpa_cli" => Ok(ScannerKind::WpaCli),
            other => Err(Error::UnknownScanner(other.to_string())),
        }
    }
}

/// 门户行为配置
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub scanner: ScannerKind,
    pub scan_wait: Duration,
    pub credentials_path: PathBuf,
    pub api_base_url: String,
    pub restart_delay: Duration,
    pub ssid_max_len: usize,
    pub password_max_len: usize,
}

/// 用于解析 TOML 的临时结构
#[derive(Deserialize)]
struct AppConfigFile {
    ap: ApConfigToml,
    portal: PortalConfigToml,
}

/// 热点本身由系统服务管理，这里不读取它的密码
#[derive(Deserialize)]
struct ApConfigToml {
    ssid: String,
    bind_addr: String,
    interface_name: String,
}

#[derive(Deserialize)]
struct PortalConfigToml {
    scanner: String,
    #[serde(default = "default_scan_wait_secs")]
    scan_wait_secs: u64,
    credentials_path: PathBuf,
    #[serde(default)]
    api_base_url: Option<String>,
    #[serde(default = "default_restart_delay_ms")]
    restart_delay_ms: u64,
    #[serde(default = "default_ssid_max_len")]
    ssid_max_len: usize,
    #[serde(default = "default_password_max_len")]
    password_max_len: usize,
}

fn default_scan_wait_secs() -> u64 {
    5
}

fn default_restart_delay_ms() -> u64 {
    1000
}

fn default_ssid_max_len() -> usize {
    32
}

fn default_password_max_len() -> usize {
    64
}

/// 端口为 80 时省略端口号
fn base_url_for(addr: SocketAddr) -> String {
    if addr.port() == 80 {
        format!("http://{}", addr.ip())
    } else {
        format!("http://{}", addr)
    }
}

// ============= 配置加载函数 =============

/// 从 TOML 字符串加载应用配置
pub fn load_config_from_toml_str(s: &str) -> Result<AppConfig> {
    let parsed: AppConfigFile = toml::from_str(s)?;

    let bind_addr = SocketAddr::from_str(&parsed.ap.bind_addr)?;
    let ap = ApConfig {
        ssid: parsed.ap.ssid,
        bind_addr,
        interface_name: parsed.ap.interface_name,
    };

    let p = parsed.portal;
    let api_base_url = p
        .api_base_url
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| base_url_for(bind_addr));

    let portal = PortalConfig {
        scanner: p.scanner.parse()?,
        scan_wait: Duration::from_secs(p.scan_wait_secs),
        credentials_path: p.credentials_path,
        api_base_url,
        restart_delay: Duration::from_millis(p.restart_delay_ms),
        ssid_max_len: p.ssid_max_len,
        password_max_len: p.password_max_len,
    };

    Ok(AppConfig { ap, portal })
}

/// 从磁盘上的 TOML 文件加载
pub async fn load_config_from_file(path: impl AsRef<Path>) -> Result<AppConfig> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    load_config_from_toml_str(&content)
}

/// 嵌入的默认配置
pub fn default_config() -> Result<AppConfig> {
    load_config_from_toml_str(DEFAULT_CONFIG_TOML)
}
