
use crate::traits::UiAssetProvider;
use crate::{Error, Result};
use async_trait::async_trait;
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// A UI asset provider that reads files directly from disk.
pub struct DiskFrontend {
    root: PathBuf,
}

impl Default for DiskFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl DiskFrontend {
    pub fn new() -> Self {
        Self::with_root(concat!(env!("CARGO_MANIFEST_DIR"), "/../ui"))
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl UiAssetProvider for DiskFrontend {
    async fn get_asset(&self, path: &str) -> Result<(Cow<'static, [u8]>, String)> {
        // 只允许普通路径分量，防止目录穿越
        let relative = Path::new(path);
        if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(Error::AssetNotFound(path.to_string()));
        }

        let content = fs::read(self.root.join(relative))
            .await
            .map_err(|_| Error::AssetNotFound(path.to_string()))?;

        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        Ok((Cow::Owned(content), mime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_parent_components() {
        let frontend = DiskFrontend::new();
        assert!(frontend.get_asset("../Cargo.toml").await.is_err());
    }

    #[tokio::test]
    async fn reads_assets_from_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("app.css"), "body{}").expect("seed");
        let frontend = DiskFrontend::with_root(dir.path());

        let (data, mime) = frontend.get_asset("app.css").await.expect("asset");
        assert_eq!(data.as_ref(), b"body{}");
        assert_eq!(mime, "text/css");
    }
}
