//! Grouping engine
//!
//! Builds the category → brand → code → products hierarchy from the flat
//! upstream product list. Leaves are sorted by ascending price and empty
//! branches are pruned, so every key present in the result holds at least
//! one product.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::classify::{classify_brand, classify_category, Category};
use crate::Product;

/// Products sharing one code, sorted by ascending price
pub type CodeMap = BTreeMap<String, Vec<Product>>;

/// Codes of one brand
pub type BrandMap = BTreeMap<String, CodeMap>;

/// Pruned category → brand → code → products nesting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupedPriceList(BTreeMap<Category, BrandMap>);

impl GroupedPriceList {
    /// Map with every category present and empty
    fn seeded() -> Self {
        Self(Category::ALL.iter().map(|c| (*c, BrandMap::new())).collect())
    }

    pub fn get(&self, category: Category) -> Option<&BrandMap> {
        self.0.get(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&Category, &BrandMap)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every (category, brand, code, products) leaf
    pub fn leaves(&self) -> impl Iterator<Item = (Category, &str, &str, &[Product])> {
        self.0.iter().flat_map(|(category, brands)| {
            brands.iter().flat_map(move |(brand, codes)| {
                codes
                    .iter()
                    .map(move |(code, products)| (*category, brand.as_str(), code.as_str(), products.as_slice()))
            })
        })
    }

    /// Total number of products across all leaves
    pub fn product_count(&self) -> usize {
        self.leaves().map(|(_, _, _, products)| products.len()).sum()
    }

    /// Mutable access for filters that rebuild the hierarchy
    pub(crate) fn insert_leaf(&mut self, category: Category, brand: &str, code: &str, products: Vec<Product>) {
        self.0
            .entry(category)
            .or_default()
            .entry(brand.to_string())
            .or_default()
            .insert(code.to_string(), products);
    }

    /// Drop empty code lists, then empty brands, then empty categories
    pub(crate) fn prune(&mut self) {
        for brands in self.0.values_mut() {
            for codes in brands.values_mut() {
                codes.retain(|_, products| !products.is_empty());
            }
            brands.retain(|_, codes| !codes.is_empty());
        }
        self.0.retain(|_, brands| !brands.is_empty());
    }

    fn push(&mut self, category: Category, brand: String, product: Product) {
        let code = product.code().into_owned();
        self.0
            .entry(category)
            .or_default()
            .entry(brand)
            .or_default()
            .entry(code)
            .or_default()
            .push(product);
    }

    fn sort_leaves(&mut self) {
        for brands in self.0.values_mut() {
            for codes in brands.values_mut() {
                for products in codes.values_mut() {
                    // stable: equal prices keep insertion order
                    products.sort_by(|a, b| a.sort_price().total_cmp(&b.sort_price()));
                }
            }
        }
    }
}

/// Group raw upstream records.
///
/// Records that are not objects or lack `code`/`desc` are skipped.
pub fn group(records: &[Value]) -> GroupedPriceList {
    let mut grouped = GroupedPriceList::seeded();
    let mut skipped = 0usize;

    for record in records {
        let Some(product) = Product::from_record(record) else {
            skipped += 1;
            continue;
        };
        let category = classify_category(&product);
        let brand = classify_brand(&product);
        grouped.push(category, brand, product);
    }

    grouped.sort_leaves();
    grouped.prune();

    debug!(
        records = records.len(),
        skipped,
        categories = grouped.0.len(),
        "Grouped price list"
    );

    grouped
}
