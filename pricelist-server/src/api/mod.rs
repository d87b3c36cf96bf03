//! HTTP API handlers for pricelist-server

pub mod health;
pub mod price_list;
pub mod ui;

pub use health::health_check;
pub use price_list::{get_price_list, get_price_tables};
pub use ui::{not_found, serve_app_js, serve_index, serve_style_css};
