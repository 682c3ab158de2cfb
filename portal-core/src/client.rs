//! HTTP implementation of [`PortalApi`]: `GET /scan` and `POST /setup/wifi`.

use crate::structs::{Network, WifiCredentials};
use crate::traits::PortalApi;
use crate::Result;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct HttpPortalApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPortalApi {
    /// `base_url` 形如 `http://192.168.4.1`，不带结尾的 `/`
    pub fn new(base_url: impl Into<String>) -> Self {
        // 不设置超时：扫描可能持续数秒
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl PortalApi for HttpPortalApi {
    async fn fetch_networks(&self) -> Result<Vec<Network>> {
        let response = self.client.get(self.url("/scan")).send().await?;
        let networks = response.json::<Vec<Network>>().await?;
        tracing::debug!("GET /scan returned {} networks", networks.len());
        Ok(networks)
    }

    async fn submit_credentials(&self, credentials: &WifiCredentials) -> Result<()> {
        let response = self
            .client
            .post(self.url("/setup/wifi"))
            .json(credentials)
            .send()
            .await?;
        tracing::debug!("POST /setup/wifi answered {}", response.status());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode},
        routing::{get, post},
    };
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn fetch_returns_server_list_unmodified() {
        let app = Router::new().route(
            "/scan",
            get(|| async {
                Json(serde_json::json!([
                    { "ssid": "Home", "rssi": -45, "secure": true },
                    { "ssid": "Home", "rssi": -90, "secure": false },
                    { "ssid": "", "rssi": -60, "secure": false },
                ]))
            }),
        );
        let api = HttpPortalApi::new(serve(app).await);

        let networks = api.fetch_networks().await.expect("fetch");
        assert_eq!(
            networks,
            vec![
                Network { ssid: "Home".into(), rssi: -45, secure: true },
                Network { ssid: "Home".into(), rssi: -90, secure: false },
                Network { ssid: "".into(), rssi: -60, secure: false },
            ]
        );
    }

    #[tokio::test]
    async fn fetch_fails_on_non_json_body() {
        let app = Router::new().route("/scan", get(|| async { "not json" }));
        let api = HttpPortalApi::new(serve(app).await);
        assert!(api.fetch_networks().await.is_err());
    }

    #[tokio::test]
    async fn submit_posts_json_body_once() {
        let received: Arc<Mutex<Vec<(String, serde_json::Value)>>> = Arc::default();
        let sink = received.clone();
        let app = Router::new().route(
            "/setup/wifi",
            post(move |headers: HeaderMap, Json(body): Json<serde_json::Value>| {
                let sink = sink.clone();
                async move {
                    let content_type = headers
                        .get("content-type")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    sink.lock().unwrap().push((content_type, body));
                    StatusCode::OK
                }
            }),
        );
        let api = HttpPortalApi::new(serve(app).await);

        let credentials = WifiCredentials {
            ssid: "Cafe".into(),
            password: "".into(),
        };
        api.submit_credentials(&credentials).await.expect("submit");

        let received = received.lock().unwrap().clone();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].0, "application/json");
        assert_eq!(received[0].1, serde_json::json!({ "ssid": "Cafe", "password": "" }));
    }

    #[tokio::test]
    async fn submit_ignores_error_status() {
        let app = Router::new().route(
            "/setup/wifi",
            post(|| async { (StatusCode::BAD_REQUEST, "invalid SSID") }),
        );
        let api = HttpPortalApi::new(serve(app).await);
        api.submit_credentials(&WifiCredentials::default())
            .await
            .expect("status is not inspected");
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        let api = HttpPortalApi::new("http://127.0.0.1:1");
        assert!(api.submit_credentials(&WifiCredentials::default()).await.is_err());
    }
}
