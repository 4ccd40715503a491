use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_RADIUS_METERS: f64 = 5000.0;

/// Point-of-interest kinds recognised in free text. Declaration order is
/// the classifier's tie-break: the first category with a matching keyword wins.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cafe,
    Restaurant,
    Park,
    Pharmacy,
    Gas,
    Hotel,
    Hospital,
    Bank,
    Shopping,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Cafe,
        Category::Restaurant,
        Category::Park,
        Category::Pharmacy,
        Category::Gas,
        Category::Hotel,
        Category::Hospital,
        Category::Bank,
        Category::Shopping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cafe => "cafe",
            Category::Restaurant => "restaurant",
            Category::Park => "park",
            Category::Pharmacy => "pharmacy",
            Category::Gas => "gas",
            Category::Hotel => "hotel",
            Category::Hospital => "hospital",
            Category::Bank => "bank",
            Category::Shopping => "shopping",
        }
    }

    /// Lower-case trigger substrings.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Cafe => &["cafe", "coffee", "café", "coffee shop", "latte"],
            Category::Restaurant => &[
                "restaurant", "dining", "eat", "food", "dinner", "lunch", "pizza", "burger",
            ],
            Category::Park => &["park", "parks", "playground", "garden"],
            Category::Pharmacy => &["pharmacy", "drugstore", "pharmacies"],
            Category::Gas => &["gas", "gas station", "fuel", "petrol"],
            Category::Hotel => &["hotel", "hotels", "lodging", "accommodation"],
            Category::Hospital => &["hospital", "hospitals", "medical", "clinic", "doctor"],
            Category::Bank => &["bank", "atm", "cash"],
            Category::Shopping => &["shop", "store", "mall", "shopping"],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured reading of one free-text query.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchIntent {
    pub original_query: String,
    pub category: Option<Category>,
    pub radius_meters: f64,
    pub is_nearby: bool,
}

impl SearchIntent {
    /// The query string sent upstream: `"<category> near me"` when a
    /// category was recognised, the user's own words otherwise.
    pub fn search_text(&self) -> String {
        match self.category {
            Some(category) => format!("{} near me", category),
            None => self.original_query.trim().to_string(),
        }
    }
}
