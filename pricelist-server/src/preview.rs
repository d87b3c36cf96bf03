//! Offline preview of a saved price list
//!
//! Runs the same grouping and table code as the server against a JSON file,
//! either a bare array of product records or an upstream-style `{"data": [...]}`
//! payload.

use clap::ValueEnum;
use pricelist_common::view::{build_tables, format_rupiah, PriceTable};
use pricelist_common::{Error, GroupedPriceList, Result, VisibilityFilter};
use serde_json::Value;
use std::fmt::Write as _;
use std::path::Path;

use crate::upstream::parse_payload;

/// Output of the preview binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewFormat {
    /// Grouped structure as served by /api/price-list (never filtered)
    Json,
    /// Price tables as shown in the browser
    Text,
}

/// Load product records from a saved file
pub fn load_records(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read(path)?;
    let value: Value = serde_json::from_slice(&content)?;
    match value {
        Value::Array(records) => Ok(records),
        _ => parse_payload(&content).map_err(|e| Error::InvalidInput(e.to_string())),
    }
}

/// Plain-text rendering of price tables
pub fn render_text(tables: &[PriceTable]) -> String {
    let mut out = String::new();
    for table in tables {
        let _ = writeln!(out, "== {} ==", table.title);
        for product in &table.products {
            let _ = writeln!(
                out,
                "{:<14} {:<44} {:>14}  {}",
                product.code(),
                product.desc(),
                format_rupiah(product.sort_price()),
                if product.is_available() { "Open" } else { "Gangguan" },
            );
        }
        out.push('\n');
    }
    out
}

/// Convenience: tables straight from a grouped list
pub fn text_summary(grouped: &GroupedPriceList) -> String {
    render_text(&build_tables(grouped))
}

/// Render a grouped list; `filter` only applies to the text tables
pub fn render(grouped: &GroupedPriceList, format: PreviewFormat, filter: &VisibilityFilter) -> Result<String> {
    match format {
        PreviewFormat::Json => Ok(serde_json::to_string_pretty(grouped)? + "\n"),
        PreviewFormat::Text => Ok(text_summary(&filter.apply(grouped))),
    }
}
