//! Season/category derivation and product filtering.
//!
//! Products in the ERP carry no explicit taxonomy; the demo data encodes it
//! in the label ("Pommes Fruits Automne"). Both the ERP-API path and the SQL
//! fallback run this module over their rows so the two paths classify
//! identically.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::ProductView;

/// Season derived from a product label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Hiver,
    Printemps,
    #[serde(rename = "Été")]
    Ete,
    Automne,
    Inconnu,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Hiver => "Hiver",
            Season::Printemps => "Printemps",
            Season::Ete => "Été",
            Season::Automne => "Automne",
            Season::Inconnu => "Inconnu",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category derived from a product label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Fruits,
    #[serde(rename = "Légumes")]
    Legumes,
    #[serde(rename = "Produits Transformés")]
    ProduitsTransformes,
    Inconnu,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fruits => "Fruits",
            Category::Legumes => "Légumes",
            Category::ProduitsTransformes => "Produits Transformés",
            Category::Inconnu => "Inconnu",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Fixed priority order; first substring hit wins. Matching is
// case-sensitive, like the demo data.
const SEASON_KEYWORDS: [(&str, Season); 4] = [
    ("Hiver", Season::Hiver),
    ("Printemps", Season::Printemps),
    ("Été", Season::Ete),
    ("Automne", Season::Automne),
];

const CATEGORY_KEYWORDS: [(&str, Category); 3] = [
    ("Fruits", Category::Fruits),
    ("Légumes", Category::Legumes),
    ("Produits Transformés", Category::ProduitsTransformes),
];

/// Derives the season from a product label.
pub fn season_for_label(label: &str) -> Season {
    SEASON_KEYWORDS
        .iter()
        .find(|(keyword, _)| label.contains(keyword))
        .map(|(_, season)| *season)
        .unwrap_or(Season::Inconnu)
}

/// Derives the category from a product label.
pub fn category_for_label(label: &str) -> Category {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| label.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Inconnu)
}

/// Query parameters accepted by the product listing endpoints.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FilterParams {
    pub search: Option<String>,
    pub season: Option<String>,
    pub category: Option<String>,
}

/// Product filter: a pure conjunction of the supplied criteria.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub season: Option<String>,
    pub category: Option<String>,
}

impl ProductFilter {
    /// Whether any criterion is set.
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.season.is_none() && self.category.is_none()
    }

    /// A product is retained iff it passes every supplied criterion.
    pub fn matches(&self, product: &ProductView) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let hit = product.label.to_lowercase().contains(&term)
                || product.description.to_lowercase().contains(&term)
                || product.reference.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }

        if let Some(season) = &self.season {
            if product.season.as_str() != season {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if product.category.as_str() != category {
                return false;
            }
        }

        true
    }
}

impl From<FilterParams> for ProductFilter {
    fn from(params: FilterParams) -> Self {
        // Empty query values ("?season=") count as absent.
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.trim().is_empty())
        }

        Self {
            search: non_empty(params.search),
            season: non_empty(params.season),
            category: non_empty(params.category),
        }
    }
}
