//! Brand classification

use super::{contains_any, ProductText};
use crate::Product;

/// Brand label for products no keyword recognises
pub const UNKNOWN_BRAND: &str = "Lainnya";

/// Ordered brand keyword table, scanned over name and description.
///
/// Order breaks ties: the first brand with any matching keyword wins.
pub const BRAND_KEYWORDS: &[(&str, &[&str])] = &[
    ("Telkomsel", &["telkomsel", "tsel", "simpati", "kartu as", "kartu halo"]),
    ("Indosat", &["indosat", "im3", "ooredoo", "mentari"]),
    ("XL", &["xl", "axiata"]),
    ("Axis", &["axis"]),
    ("Three", &["three", "tri", "3"]),
    ("Smartfren", &["smartfren", "smart"]),
    ("DANA", &["dana"]),
    ("OVO", &["ovo"]),
    ("GoPay", &["gopay", "go pay", "go-pay"]),
    ("ShopeePay", &["shopeepay", "shopee pay", "shopee-pay"]),
    ("LinkAja", &["linkaja", "link aja", "link-aja"]),
    ("FREE FIRE", &["free fire", "ff", "freefire"]),
    ("MOBILE LEGENDS", &["mobile legends", "ml", "mobilelegends"]),
    ("Honor of Kings", &["honor of kings", "hok"]),
    ("PLN", &["pln", "listrik", "token listrik"]),
];

/// Resolve the brand label of a product.
///
/// An explicit `brand` field wins outright and is returned with its first
/// character upper-cased.
pub fn classify_brand(product: &Product) -> String {
    if let Some(brand) = product.brand() {
        return capitalize_first(&brand);
    }

    brand_from_text(&ProductText::of(product)).to_string()
}

/// Keyword-table lookup over lower-cased name and description
pub fn brand_from_text(text: &ProductText) -> &'static str {
    BRAND_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(&text.name, keywords) || contains_any(&text.desc, keywords))
        .map(|(label, _)| *label)
        .unwrap_or(UNKNOWN_BRAND)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
