use crate::backends::{mock::MockScanner, wpa_cli::WpaCliScanner};
use crate::config::{AppConfig, ScannerKind};
use crate::traits::{UiAssetProvider, WifiScanner};
use std::sync::Arc;

/// 根据编译特性选择前端资源的交付方式
pub fn create_frontend() -> Arc<dyn UiAssetProvider> {
    #[cfg(feature = "ui_disk")]
    {
        tracing::info!("💿 Frontend: Disk Provider selected (for local development)");
        Arc::new(crate::frontends::provider_disk::DiskFrontend::new())
    }
    #[cfg(not(feature = "ui_disk"))]
    {
        tracing::info!("📦 Frontend: Embed Provider selected (for deployment)");
        Arc::new(crate::frontends::provider_embed::EmbedFrontend::new())
    }
}

/// 根据配置选择扫描器
pub fn create_scanner(config: &AppConfig) -> Arc<dyn WifiScanner> {
    match config.portal.scanner {
        ScannerKind::Mock => {
            tracing::info!("🤖 Scanner: mock");
            Arc::new(MockScanner::new())
        }
        ScannerKind::WpaCli => {
            tracing::info!("📡 Scanner: wpa_cli on {}", config.ap.interface_name);
            Arc::new(WpaCliScanner::new(
                config.ap.interface_name.clone(),
                config.portal.scan_wait,
            ))
        }
    }
}
