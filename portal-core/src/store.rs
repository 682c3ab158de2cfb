use crate::structs::WifiCredentials;
use crate::traits::CredentialStore;
use crate::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// 把 STA 凭据写入设备的 JSON 配置文件。
///
/// 文件中的其他键（例如 `ap_ssid`）原样保留，只更新 `sta_ssid` 与 `sta_password`。
/// 文件不存在时从空对象开始。
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_document(&self) -> Result<Map<String, Value>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Config file {:?} not found, starting empty", self.path);
                Ok(Map::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl CredentialStore for JsonFileStore {
    async fn save_sta_config(&self, credentials: &WifiCredentials) -> Result<()> {
        let mut doc = self.read_document().await?;
        doc.insert("sta_ssid".into(), Value::String(credentials.ssid.clone()));
        doc.insert("sta_password".into(), Value::String(credentials.password.clone()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let pretty = serde_json::to_vec_pretty(&Value::Object(doc))?;
        tokio::fs::write(&self.path, pretty).await?;

        tracing::info!("💾 Saved STA config for '{}' to {:?}", credentials.ssid, self.path);
        Ok(())
    }
}
