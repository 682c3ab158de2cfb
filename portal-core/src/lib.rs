//! Core library for the Wi-Fi setup captive portal.
//! This crate defines the core traits (interfaces) and data structures,
//! the headless setup page controller, the HTTP client the page talks to,
//! and the device-side web server answering `/scan` and `/setup/wifi`.

pub mod backends;
pub mod client;
pub mod config;
pub mod factory;
pub mod frontends;
pub mod page;
pub mod store;
pub mod structs;
pub mod traits;
pub mod utils;
pub mod web_server;

// Define a shared Error and Result type for the entire crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Web server error: {0}")]
    WebServer(#[from] axum::BoxError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Unknown scanner kind: {0}")]
    UnknownScanner(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("No pending Wi-Fi configuration")]
    NoPendingConfig,

    #[error("Pending Wi-Fi configuration lock poisoned")]
    StatePoisoned,

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// A specialized `Result` type for this crate's operations.
pub type Result<T> = std::result::Result<T, Error>;
