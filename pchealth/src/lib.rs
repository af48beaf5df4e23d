//! Library surface of the pchealth dashboard client, shared by the binary and integration tests.

pub mod api;
pub mod app;
pub mod cleanup;
pub mod config;
pub mod dispatch;
pub mod format;
pub mod history;
pub mod net_rate;
pub mod profiles;
pub mod render;
pub mod types;
pub mod ui;
pub mod widgets;
pub mod wire;
pub mod ws;
