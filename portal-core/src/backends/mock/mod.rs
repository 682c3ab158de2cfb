use crate::Result;
use crate::structs::Network;
use crate::traits::WifiScanner;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

/// A mock scanner for local development and tests.
/// It simulates scanning without any real hardware interaction.
#[derive(Debug, Clone)]
pub struct MockScanner {
    networks: Vec<Network>,
    delay: Duration,
}

impl Default for MockScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockScanner {
    /// 固定的假网络列表，模拟 2 秒扫描耗时
    pub fn new() -> Self {
        let networks = vec![
            Network {
                ssid: "MyHomeWiFi".to_string(),
                rssi: -42,
                secure: true,
            },
            Network {
                ssid: "CafeGuest".to_string(),
                rssi: -67,
                secure: false,
            },
            Network {
                ssid: "Neighbor's Network".to_string(),
                rssi: -78,
                secure: true,
            },
            Network {
                ssid: "xfinitywifi".to_string(),
                rssi: -58,
                secure: false,
            },
            Network {
                ssid: "FarAway".to_string(),
                rssi: -88,
                secure: true,
            },
        ];
        Self {
            networks,
            delay: Duration::from_secs(2),
        }
    }

    /// 使用指定的网络列表，不模拟耗时
    pub fn with_networks(networks: Vec<Network>) -> Self {
        Self {
            networks,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl WifiScanner for MockScanner {
    async fn scan(&self) -> Result<Vec<Network>> {
        tracing::info!("🤖 [MockScanner] Scanning for networks...");
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        tracing::info!("🤖 [MockScanner] Found {} networks.", self.networks.len());
        Ok(self.networks.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn injected_list_is_returned_in_order() {
        let networks = vec![
            Network { ssid: "B".into(), rssi: -70, secure: false },
            Network { ssid: "A".into(), rssi: -40, secure: true },
        ];
        let scanner = MockScanner::with_networks(networks.clone());
        assert_eq!(scanner.scan().await.expect("scan"), networks);
    }
}
