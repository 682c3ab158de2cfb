pub mod mock;
pub mod wpa_cli;
