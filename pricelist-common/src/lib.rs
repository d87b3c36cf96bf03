//! # Price List Common Library
//!
//! Shared code for the voucher price-list services including:
//! - Product records as delivered by the upstream price-list API
//! - Category and brand classification
//! - Grouping of the flat product list into category → brand → code
//! - Visibility filtering and price-table view models
//! - Configuration loading

pub mod classify;
pub mod config;
pub mod error;
pub mod grouping;
pub mod product;
pub mod view;

pub use classify::{classify_brand, classify_category, Category};
pub use error::{Error, Result};
pub use grouping::{group, GroupedPriceList};
pub use product::Product;
pub use view::VisibilityFilter;
