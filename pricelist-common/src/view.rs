//! Price-table views
//!
//! Turns a [`GroupedPriceList`] into the tables shown to customers:
//! a visibility filter hides internal/test codes, codes of one brand are merged
//! by their alphabetic prefix, and each table is rendered as an HTML fragment.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::classify::Category;
use crate::grouping::GroupedPriceList;
use crate::Product;

/// Order in which category sections are displayed
pub const DISPLAY_ORDER: [Category; 7] = [
    Category::PulsaTransfer,
    Category::PulsaReguler,
    Category::Data,
    Category::EMoney,
    Category::Games,
    Category::Pln,
    Category::Lainnya,
];

/// Codes and descriptions hidden from the rendered tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityFilter {
    /// Code prefixes, matched case-insensitively
    pub hidden_prefixes: Vec<String>,
    /// Exact codes, matched case-insensitively
    pub hidden_codes: Vec<String>,
    /// Description keywords, matched case-insensitively
    pub hidden_keywords: Vec<String>,
}

impl Default for VisibilityFilter {
    fn default() -> Self {
        Self {
            hidden_prefixes: ["OMCEK", "DANATES", "OVOTES", "TES"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            hidden_codes: Vec::new(),
            hidden_keywords: Vec::new(),
        }
    }
}

impl VisibilityFilter {
    /// Filter that hides nothing
    pub fn none() -> Self {
        Self {
            hidden_prefixes: Vec::new(),
            hidden_codes: Vec::new(),
            hidden_keywords: Vec::new(),
        }
    }

    pub fn hides_code(&self, code: &str) -> bool {
        let code = code.to_lowercase();
        self.hidden_prefixes
            .iter()
            .any(|prefix| code.starts_with(&prefix.to_lowercase()))
            || self.hidden_codes.iter().any(|c| c.to_lowercase() == code)
    }

    pub fn hides_product(&self, product: &Product) -> bool {
        if self.hidden_keywords.is_empty() {
            return false;
        }
        let desc = product.desc().to_lowercase();
        self.hidden_keywords
            .iter()
            .any(|keyword| desc.contains(&keyword.to_lowercase()))
    }

    /// Copy of `grouped` without hidden codes and products, pruned
    pub fn apply(&self, grouped: &GroupedPriceList) -> GroupedPriceList {
        let mut visible = GroupedPriceList::default();
        for (category, brand, code, products) in grouped.leaves() {
            if self.hides_code(code) {
                continue;
            }
            let kept: Vec<Product> = products
                .iter()
                .filter(|p| !self.hides_product(p))
                .cloned()
                .collect();
            if !kept.is_empty() {
                visible.insert_leaf(category, brand, code, kept);
            }
        }
        visible.prune();
        visible
    }
}

/// Leading ASCII-alphabetic run of a code, if any
pub fn code_prefix(code: &str) -> Option<&str> {
    let end = code
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(code.len());
    if end == 0 {
        None
    } else {
        Some(&code[..end])
    }
}

/// One rendered table: all codes of a brand sharing a prefix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTable {
    pub category: Category,
    pub brand: String,
    pub prefix: String,
    pub title: String,
    pub products: Vec<Product>,
}

/// Build the tables for every category in [`DISPLAY_ORDER`].
///
/// Codes without an alphabetic prefix are not shown.
pub fn build_tables(grouped: &GroupedPriceList) -> Vec<PriceTable> {
    let mut tables = Vec::new();

    for category in DISPLAY_ORDER {
        let Some(brands) = grouped.get(category) else {
            continue;
        };
        for (brand, codes) in brands {
            let mut by_prefix: Vec<(String, Vec<Product>)> = Vec::new();
            for (code, products) in codes {
                let Some(prefix) = code_prefix(code) else {
                    continue;
                };
                match by_prefix.iter_mut().find(|(p, _)| p == prefix) {
                    Some((_, merged)) => merged.extend(products.iter().cloned()),
                    None => by_prefix.push((prefix.to_string(), products.clone())),
                }
            }

            for (prefix, mut products) in by_prefix {
                products.sort_by(|a, b| a.sort_price().total_cmp(&b.sort_price()));
                tables.push(PriceTable {
                    category,
                    brand: brand.clone(),
                    title: table_title(brand, category, &prefix),
                    prefix,
                    products,
                });
            }
        }
    }

    tables
}

/// Category shown in table titles; PLN and Lainnya tables carry none
fn section_label(category: Category) -> Option<&'static str> {
    match category {
        Category::Pln | Category::Lainnya => None,
        other => Some(other.label()),
    }
}

fn table_title(brand: &str, category: Category, prefix: &str) -> String {
    match section_label(category) {
        Some(label) => format!("{} {} - Kode {}", brand, label, prefix.to_uppercase()),
        None => format!("{} - Kode {}", brand, prefix.to_uppercase()),
    }
}

/// Rupiah amount with `.` thousands separators, e.g. `Rp 10.500`
pub fn format_rupiah(price: f64) -> String {
    let whole = price.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    out.push_str("Rp ");
    if whole < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Render tables as an HTML fragment
pub fn render_tables_html(tables: &[PriceTable]) -> String {
    let mut html = String::new();
    for table in tables {
        render_table(&mut html, table);
    }
    html
}

fn render_table(html: &mut String, table: &PriceTable) {
    let _ = write!(
        html,
        "<div class='table-responsive mb-4' data-category='{}'><div class='tablewrapper'>\
         <table class='tabel'>\
         <tr class='head'><td colspan='4' class='center last title'>{}</td></tr>\
         <tr class='head'><td class='center'>Kode</td><td class='center'>Keterangan</td>\
         <td class='center'>Harga</td><td class='center last'>Status</td></tr>",
        html_escape::encode_single_quoted_attribute(table.category.label()),
        html_escape::encode_text(&table.title),
    );

    for product in &table.products {
        let (status, class) = if product.is_available() {
            ("Open", "status-open")
        } else {
            ("Gangguan", "status-down")
        };
        let _ = write!(
            html,
            "<tr class='td1'><td class='center'>{}</td><td class='center'>{}</td>\
             <td class='center'>{}</td><td class='center last {}'>{}</td></tr>",
            html_escape::encode_text(&product.code()),
            html_escape::encode_text(&product.desc()),
            format_rupiah(product.sort_price()),
            class,
            status,
        );
    }

    html.push_str("</table></div></div>");
}
