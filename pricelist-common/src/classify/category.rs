//! Category classification

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{contains_any, Field, ProductText};
use crate::Product;

/// Top-level price-list bucket.
///
/// Declaration order is the order used for the JSON output keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Pulsa Transfer")]
    PulsaTransfer,
    #[serde(rename = "Pulsa Reguler")]
    PulsaReguler,
    #[serde(rename = "Data")]
    Data,
    #[serde(rename = "Games")]
    Games,
    #[serde(rename = "E-Money")]
    EMoney,
    #[serde(rename = "PLN")]
    Pln,
    /// Catch-all ("Other")
    #[serde(rename = "Lainnya")]
    Lainnya,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 7] = [
        Category::PulsaTransfer,
        Category::PulsaReguler,
        Category::Data,
        Category::Games,
        Category::EMoney,
        Category::Pln,
        Category::Lainnya,
    ];

    /// Display label, as used in JSON keys and table titles
    pub fn label(self) -> &'static str {
        match self {
            Category::PulsaTransfer => "Pulsa Transfer",
            Category::PulsaReguler => "Pulsa Reguler",
            Category::Data => "Data",
            Category::Games => "Games",
            Category::EMoney => "E-Money",
            Category::Pln => "PLN",
            Category::Lainnya => "Lainnya",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Keywords looked up in one field
#[derive(Debug, Clone, Copy)]
pub struct FieldMatch {
    pub field: Field,
    pub keywords: &'static [&'static str],
}

/// A rule matches when any of its field matches hits
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: Category,
    pub matches: &'static [FieldMatch],
}

impl CategoryRule {
    pub fn matches(&self, text: &ProductText) -> bool {
        self.matches
            .iter()
            .any(|m| contains_any(text.field(m.field), m.keywords))
    }
}

const TRANSFER_KEYWORDS: &[&str] = &[
    "transfer",
    "pulsa transfer",
    "bagi pulsa",
    "shared pulsa",
    "kirim pulsa",
];

const DATA_KEYWORDS: &[&str] = &["data", "kuota", "internet", "gb", "mb"];

const GAME_KEYWORDS: &[&str] = &[
    "free fire",
    "mobile legends",
    "ml",
    "honor of kings",
    "pubg",
    "game",
];

const EMONEY_KEYWORDS: &[&str] = &[
    "gopay",
    "go pay",
    "dana",
    "ovo",
    "linkaja",
    "link aja",
    "shopeepay",
    "shopee pay",
    "sakuku",
    "astrapay",
    "astra pay",
    "e-money",
    "emoney",
    "dompet digital",
    "e-wallet",
    "ewallet",
];

const PLN_KEYWORDS: &[&str] = &["pln", "listrik"];

/// Ordered category rules; the first matching rule wins and
/// [`Category::Lainnya`] is the fallback.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::PulsaTransfer,
        matches: &[FieldMatch { field: Field::Desc, keywords: TRANSFER_KEYWORDS }],
    },
    CategoryRule {
        category: Category::PulsaReguler,
        matches: &[
            FieldMatch { field: Field::Category, keywords: &["pulsa"] },
            FieldMatch { field: Field::Desc, keywords: &["pulsa"] },
        ],
    },
    CategoryRule {
        category: Category::Data,
        matches: &[
            FieldMatch { field: Field::Desc, keywords: DATA_KEYWORDS },
            FieldMatch { field: Field::Name, keywords: &["data"] },
        ],
    },
    CategoryRule {
        category: Category::Games,
        matches: &[
            FieldMatch { field: Field::Desc, keywords: GAME_KEYWORDS },
            FieldMatch { field: Field::Name, keywords: GAME_KEYWORDS },
        ],
    },
    CategoryRule {
        category: Category::EMoney,
        matches: &[
            FieldMatch { field: Field::Desc, keywords: EMONEY_KEYWORDS },
            FieldMatch { field: Field::Name, keywords: EMONEY_KEYWORDS },
            FieldMatch { field: Field::Category, keywords: EMONEY_KEYWORDS },
        ],
    },
    CategoryRule {
        category: Category::Pln,
        matches: &[
            FieldMatch { field: Field::Desc, keywords: PLN_KEYWORDS },
            FieldMatch { field: Field::Name, keywords: PLN_KEYWORDS },
        ],
    },
];

/// Assign exactly one category to a product
pub fn classify_category(product: &Product) -> Category {
    classify_text(&ProductText::of(product))
}

/// Category of already lower-cased product text.
///
/// An empty description always yields [`Category::Lainnya`].
pub fn classify_text(text: &ProductText) -> Category {
    if text.desc.is_empty() {
        return Category::Lainnya;
    }

    CATEGORY_RULES
        .iter()
        .find(|rule| rule.matches(text))
        .map(|rule| rule.category)
        .unwrap_or(Category::Lainnya)
}
