//! Headless controller for the Wi-Fi setup page.
//!
//! The controller owns the page's view model and the last fetched network
//! list, and reaches the device only through [`PortalApi`].

pub mod html;
pub mod view;

use crate::structs::{Network, WifiCredentials};
use crate::traits::{Clock, PortalApi};
use crate::Result;
use std::sync::Arc;
use view::{FooterView, FormField, ListItemView, PageView, Panel};

pub struct PageController {
    api: Arc<dyn PortalApi>,
    clock: Arc<dyn Clock>,
    view: PageView,
    networks: Vec<Network>,
}

impl PageController {
    /// Creates the controller and performs the initial render.
    pub fn new(api: Arc<dyn PortalApi>, clock: Arc<dyn Clock>) -> Self {
        let mut controller = Self {
            api,
            clock,
            view: PageView::default(),
            networks: Vec::new(),
        };
        controller.initial_render();
        controller
    }

    /// 把当前年份写入一个页脚实例并追加到页脚区域
    pub fn initial_render(&mut self) {
        let year = self.clock.current_year();
        self.view.footer.push(FooterView { year });
    }

    pub fn view(&self) -> &PageView {
        &self.view
    }

    /// 最近一次获取到的网络列表
    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    pub fn render_html(&self) -> String {
        html::render_page(&self.view)
    }

    /// "refresh" 按钮：Found -> Loading -> Found
    ///
    /// 获取失败时返回错误，页面停留在 Loading。
    pub async fn refresh_networks(&mut self) -> Result<()> {
        tracing::debug!("Refreshing network list");
        self.view.panel = Panel::Loading;
        self.view.list.clear();

        let networks = self.api.fetch_networks().await?;
        self.render_list(&networks);
        self.networks = networks;

        self.view.panel = Panel::Found;
        Ok(())
    }

    /// "scan" 按钮：Hero -> Loading -> Found
    ///
    /// 与 refresh 不同，不会在请求前清空列表。
    pub async fn scan_networks(&mut self) -> Result<()> {
        tracing::debug!("Scanning for networks");
        self.view.panel = Panel::Loading;

        let networks = self.api.fetch_networks().await?;
        self.render_list(&networks);
        self.networks = networks;

        self.view.panel = Panel::Found;
        Ok(())
    }

    /// 整体重建列表，保持输入顺序
    pub fn render_list(&mut self, networks: &[Network]) {
        self.view.list = networks.iter().map(ListItemView::from_network).collect();
    }

    /// 点击第 `index` 个列表项的选择按钮
    pub fn select_item(&mut self, index: usize) -> bool {
        match self.view.list.get(index) {
            Some(item) => {
                let ssid = item.data_ssid.clone();
                self.select_ssid(&ssid);
                true
            }
            None => false,
        }
    }

    /// 把 SSID 填入表单，聚焦密码框并滚动到可见位置
    pub fn select_ssid(&mut self, ssid: &str) {
        self.view.form.ssid = ssid.to_string();
        self.view.form.focus = Some(FormField::Password);
        self.view.form.password_scrolled_into_view = true;
    }

    /// 用户在 SSID 输入框中输入
    pub fn input_ssid(&mut self, ssid: impl Into<String>) {
        self.view.form.ssid = ssid.into();
        self.view.form.focus = Some(FormField::Ssid);
    }

    /// 用户在密码框中输入
    pub fn input_password(&mut self, password: impl Into<String>) {
        self.view.form.password = password.into();
        self.view.form.focus = Some(FormField::Password);
    }

    /// 提交表单：原样发送当前输入，只记录结果，不改变页面
    pub async fn submit_credentials(&mut self) {
        let credentials = WifiCredentials {
            ssid: self.view.form.ssid.clone(),
            password: self.view.form.password.clone(),
        };

        match self.api.submit_credentials(&credentials).await {
            Ok(()) => tracing::info!("✅ Wi-Fi settings sent for '{}'", credentials.ssid),
            Err(e) => tracing::warn!("Failed to send Wi-Fi settings: {}", e),
        }
    }

    /// 丢弃已输入的密码，其余表单状态保持不变
    pub fn forget_password(&mut self) {
        self.view.form.password.clear();
    }
}
