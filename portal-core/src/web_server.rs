use crate::config::PortalConfig;
use crate::page::PageController;
use crate::structs::WifiCredentials;
use crate::traits::{CredentialStore, UiAssetProvider, WifiScanner};
use crate::utils::sanitize_input;
use crate::{Error, Result};
use axum::{
    Form, Json, Router,
    body::{Body, Bytes},
    extract::State,
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// 凭据请求体远小于这个值
const MAX_BODY_BYTES: usize = 4 * 1024;

/// Web 服务器状态
pub struct AppState {
    scanner: Arc<dyn WifiScanner>,
    store: Arc<dyn CredentialStore>,
    frontend: Arc<dyn UiAssetProvider>,
    // 页面控制器同一时间只由一个请求驱动
    page: tokio::sync::Mutex<PageController>,
    // /setup/wifi 收到、/setup 确认前的凭据
    pending: Mutex<Option<WifiCredentials>>,
    ssid_max_len: usize,
    password_max_len: usize,
    restart_delay: Duration,
    shutdown: Arc<Notify>,
}

impl AppState {
    pub fn new(
        scanner: Arc<dyn WifiScanner>,
        store: Arc<dyn CredentialStore>,
        frontend: Arc<dyn UiAssetProvider>,
        page: PageController,
        config: &PortalConfig,
    ) -> Self {
        Self {
            scanner,
            store,
            frontend,
            page: tokio::sync::Mutex::new(page),
            pending: Mutex::new(None),
            ssid_max_len: config.ssid_max_len,
            password_max_len: config.password_max_len,
            restart_delay: config.restart_delay,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// 等待 /setup 或 /close 触发的关闭信号
    pub fn shutdown_signal(&self) -> Arc<Notify> {
        self.shutdown.clone()
    }

    /// 锁中毒时返回 `Error::StatePoisoned`，与"没有待确认配置"区分开
    pub fn pending_credentials(&self) -> Result<Option<WifiCredentials>> {
        self.pending
            .lock()
            .map(|pending| pending.clone())
            .map_err(|_| Error::StatePoisoned)
    }

    /// 延迟一段时间后关闭服务器，让响应先送达浏览器
    fn schedule_restart(&self) {
        let shutdown = self.shutdown.clone();
        let delay = self.restart_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::info!("🔄 Restarting portal service");
            shutdown.notify_one();
        });
    }
}

/// 构建路由
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // 设备接口
        .route("/scan", get(api_scan))
        .route("/setup/wifi", post(api_setup_wifi))
        .route("/setup", post(api_setup))
        .route("/close", post(api_close))
        .route("/generate_204", get(handle_captive_portal))
        // 页面
        .route("/", get(page_index))
        .route("/page/scan", post(page_scan))
        .route("/page/refresh", post(page_refresh))
        .route("/page/select", post(page_select))
        .route("/page/submit", post(page_submit))
        .fallback(serve_static_asset)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 启动 Web 服务器，直到收到关闭信号
pub async fn run_server(bind_addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let shutdown = state.shutdown_signal();
    let app = build_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("🌐 Web server listening on {}", bind_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async move { shutdown.notified().await })
        .await?;

    tracing::info!("🛑 Web server stopped");
    Ok(())
}

// --- 设备接口 ---

/// 每次请求都执行一次实时扫描
async fn api_scan(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.scanner.scan().await {
        Ok(networks) => (StatusCode::OK, Json(networks)).into_response(),
        Err(e) => {
            tracing::error!("❌ Scan failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// 字段缺失时视为空字符串
#[derive(Deserialize)]
struct SetupWifiRequest {
    #[serde(default)]
    ssid: String,
    #[serde(default)]
    password: String,
}

/// 预存凭据，等待 /setup 确认
async fn api_setup_wifi(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    if body.is_empty() {
        return (StatusCode::BAD_REQUEST, "empty body");
    }

    let request: SetupWifiRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Rejected /setup/wifi body: {}", e);
            return (StatusCode::BAD_REQUEST, "invalid JSON");
        }
    };

    let ssid = sanitize_input(&request.ssid, state.ssid_max_len);
    let password = sanitize_input(&request.password, state.password_max_len);

    if ssid.is_empty() {
        return (StatusCode::BAD_REQUEST, "invalid SSID");
    }

    tracing::info!(ssid = %ssid, "📝 Wi-Fi configuration received");
    match state.pending.lock() {
        Ok(mut pending) => *pending = Some(WifiCredentials { ssid, password }),
        Err(_) => {
            tracing::error!("❌ {}", Error::StatePoisoned);
            return (StatusCode::INTERNAL_SERVER_ERROR, "server error");
        }
    }

    (StatusCode::OK, "configuration received")
}

/// 确认并持久化预存的凭据，随后重启
async fn api_setup(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let result = match state.pending_credentials() {
        Ok(Some(credentials)) => state.store.save_sta_config(&credentials).await,
        Ok(None) => Err(Error::NoPendingConfig),
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!("❌ Failed to save Wi-Fi configuration: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, "server error");
    }

    state.schedule_restart();
    (StatusCode::OK, "configuration saved")
}

/// 不保存，直接重启
async fn api_close(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    tracing::info!("Portal closed by user");
    state.schedule_restart();
    (StatusCode::OK, "system restarting")
}

/// 处理捕获门户检测请求（Android 的 generate_204）
async fn handle_captive_portal() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

// --- 页面 ---

async fn page_index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.lock().await.render_html())
}

async fn page_scan(State(state): State<Arc<AppState>>) -> Redirect {
    if let Err(e) = state.page.lock().await.scan_networks().await {
        tracing::warn!("Scan from page failed: {}", e);
    }
    Redirect::to("/")
}

async fn page_refresh(State(state): State<Arc<AppState>>) -> Redirect {
    if let Err(e) = state.page.lock().await.refresh_networks().await {
        tracing::warn!("Refresh from page failed: {}", e);
    }
    Redirect::to("/")
}

/// 列表项按钮提交的是下标
#[derive(Deserialize)]
struct SelectForm {
    item: usize,
}

async fn page_select(State(state): State<Arc<AppState>>, Form(form): Form<SelectForm>) -> Redirect {
    if !state.page.lock().await.select_item(form.item) {
        // 列表在渲染之后被刷新过
        tracing::debug!("No list item at index {}", form.item);
        return Redirect::to("/");
    }
    // 锚点让浏览器把密码框滚动到可见位置
    Redirect::to("/#passwordInput")
}

#[derive(Deserialize)]
struct SubmitForm {
    #[serde(default)]
    ssid: String,
    #[serde(default)]
    password: String,
}

async fn page_submit(State(state): State<Arc<AppState>>, Form(form): Form<SubmitForm>) -> Redirect {
    let mut page = state.page.lock().await;
    page.input_ssid(form.ssid);
    page.input_password(form.password);
    page.submit_credentials().await;
    // 控制器为所有访问者共享，密码不能留到下一次渲染
    page.forget_password();
    Redirect::to("/")
}

/// 处理静态资产的 Fallback 处理器
///
/// 不是已知资产的路径一律返回页面本身，这样任意 URL 都会落到配网页面。
async fn serve_static_asset(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if !path.is_empty() {
        if let Ok((data, mime)) = state.frontend.get_asset(path).await {
            return Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime)
                .body(Body::from(data))
                .unwrap_or_else(|_| {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build response").into_response()
                });
        }
        tracing::debug!("No asset at {}, serving the setup page", path);
    }

    page_index(State(state)).await.into_response()
}
