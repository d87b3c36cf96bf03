//! Product classification
//!
//! Both classifiers are ordered keyword tables evaluated first-match-wins
//! against the lower-cased free-text fields of a product. Matching is an
//! unanchored substring test, so short keywords such as "ml", "gb" or "3"
//! also match inside unrelated words.

mod brand;
mod category;

pub use brand::{brand_from_text, classify_brand, BRAND_KEYWORDS, UNKNOWN_BRAND};
pub use category::{
    classify_category, classify_text, Category, CategoryRule, FieldMatch, CATEGORY_RULES,
};

use crate::Product;
use std::borrow::Cow;

/// Free-text field of a product consulted by a keyword rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Desc,
    Name,
    Category,
}

/// Lower-cased copies of the classification fields of one product.
///
/// Missing fields are empty strings, which never contain a keyword.
#[derive(Debug, Clone, Default)]
pub struct ProductText {
    pub desc: String,
    pub name: String,
    pub category: String,
}

impl ProductText {
    pub fn of(product: &Product) -> Self {
        Self {
            desc: product.desc().to_lowercase(),
            name: lower_or_empty(product.name()),
            category: lower_or_empty(product.category_hint()),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Desc => &self.desc,
            Field::Name => &self.name,
            Field::Category => &self.category,
        }
    }
}

fn lower_or_empty(text: Option<Cow<'_, str>>) -> String {
    text.map(|t| t.to_lowercase()).unwrap_or_default()
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
