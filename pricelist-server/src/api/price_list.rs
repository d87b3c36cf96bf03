//! Price list endpoints
//!
//! Each request fetches the upstream list and regroups it from scratch.

use axum::{extract::State, response::Html, Json};
use pricelist_common::view::{build_tables, render_tables_html};
use pricelist_common::{group, GroupedPriceList};
use tracing::debug;

use crate::error::ApiResult;
use crate::AppState;

async fn fetch_grouped(state: &AppState) -> ApiResult<GroupedPriceList> {
    let records = state.source.fetch_records().await?;
    Ok(group(&records))
}

/// GET /api/price-list
///
/// Returns the full category → brand → code → products structure.
pub async fn get_price_list(State(state): State<AppState>) -> ApiResult<Json<GroupedPriceList>> {
    let grouped = fetch_grouped(&state).await?;
    debug!(products = grouped.product_count(), "Serving grouped price list");
    Ok(Json(grouped))
}

/// GET /api/price-list/tables
///
/// Returns the visible price tables as an HTML fragment.
pub async fn get_price_tables(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let grouped = fetch_grouped(&state).await?;
    let visible = state.visibility.apply(&grouped);
    let tables = build_tables(&visible);
    debug!(
        tables = tables.len(),
        hidden = grouped.product_count() - visible.product_count(),
        "Serving price tables"
    );
    Ok(Html(render_tables_html(&tables)))
}
