use portal_core::{
    client::HttpPortalApi,
    config::{self, AppConfig},
    factory::{create_frontend, create_scanner},
    page::PageController,
    store::JsonFileStore,
    traits::SystemClock,
    web_server::{self, AppState},
};
use std::sync::Arc;

/// 配置文件路径；未设置时使用编译时嵌入的 configs.toml
const CONFIG_ENV: &str = "PORTAL_CONFIG";

async fn load_config() -> anyhow::Result<AppConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            tracing::info!("📄 Loading config from {}", path);
            Ok(config::load_config_from_file(&path).await?)
        }
        Err(_) => {
            tracing::info!("📄 Using embedded default config");
            Ok(config::default_config()?)
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = load_config().await?;
    tracing::info!(
        "🚀 Starting setup portal (AP '{}' on {})",
        config.ap.ssid,
        config.ap.interface_name
    );

    let scanner = create_scanner(&config);
    let frontend = create_frontend();
    let store = Arc::new(JsonFileStore::new(&config.portal.credentials_path));

    // 页面通过 HTTP 访问本服务器的 /scan 与 /setup/wifi
    let api = Arc::new(HttpPortalApi::new(&config.portal.api_base_url));
    let page = PageController::new(api, Arc::new(SystemClock));

    let state = Arc::new(AppState::new(scanner, store, frontend, page, &config.portal));
    web_server::run_server(config.ap.bind_addr, state).await?;

    tracing::info!("🛑 Shutting down.");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 初始化日志（这是入口点的职责）
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 2. 调用库的核心逻辑，处理顶层错误
    if let Err(e) = run().await {
        tracing::error!("❌ Setup portal failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
