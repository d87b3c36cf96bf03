//! pricelist-server library
//!
//! Proxies the upstream voucher price list, groups it by category, brand and
//! code, and serves the result as JSON and as rendered price tables.

use axum::Router;
use pricelist_common::VisibilityFilter;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cli;
pub mod error;
pub mod preview;
pub mod upstream;

pub use crate::error::{ApiError, ApiResult};
pub use crate::upstream::{FetchError, PriceSource, SourceInfo};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Where the flat price list comes from
    pub source: Arc<dyn PriceSource>,
    /// Codes and products hidden from the rendered tables
    pub visibility: Arc<VisibilityFilter>,
}

impl AppState {
    pub fn new(source: Arc<dyn PriceSource>, visibility: VisibilityFilter) -> Self {
        Self {
            source,
            visibility: Arc::new(visibility),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/static/style.css", get(api::serve_style_css))
        .route("/api/price-list", get(api::get_price_list))
        .route("/api/price-list/tables", get(api::get_price_tables))
        .route("/health", get(api::health_check))
        .fallback(api::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
