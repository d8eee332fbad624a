//! JSON view models served by the REST facade and consumed by the
//! storefront and back office.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{category_for_label, season_for_label, Category, Season};

/// Normalized product as served by the facade.
///
/// `name` mirrors `label`: the ERP API speaks `label`, the relational
/// fallback historically aliased it to `name`, and downstream consumers use
/// either. The facade serves both so the two paths are indistinguishable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: i64,
    #[serde(rename = "ref")]
    pub reference: String,
    pub label: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub season: Season,
    pub category: Category,
}

impl ProductView {
    /// Builds a view from raw row data, deriving season and category.
    pub fn from_parts(
        id: i64,
        reference: String,
        label: String,
        description: String,
        price: f64,
    ) -> Self {
        let season = season_for_label(&label);
        let category = category_for_label(&label);
        Self {
            id,
            reference,
            name: label.clone(),
            label,
            description,
            price,
            season,
            category,
        }
    }
}

/// Product row raw as the Dolibarr API returns it. Ids and prices arrive as
/// strings more often than not.
#[derive(Debug, Clone, Deserialize)]
pub struct DolibarrProduct {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    #[serde(rename = "ref", default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64_opt")]
    pub price: Option<f64>,
}

impl From<DolibarrProduct> for ProductView {
    fn from(raw: DolibarrProduct) -> Self {
        ProductView::from_parts(
            raw.id,
            raw.reference.unwrap_or_default(),
            raw.label.unwrap_or_default(),
            raw.description.unwrap_or_default(),
            raw.price.unwrap_or_default(),
        )
    }
}

/// Product with its on-hand stock summed across warehouses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockView {
    pub id: i64,
    #[serde(rename = "ref")]
    pub reference: String,
    pub label: String,
    pub price: f64,
    pub stock: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerView {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub since: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemView {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    pub id: i64,
    #[serde(rename = "ref")]
    pub reference: String,
    pub customer_name: String,
    pub date: Option<NaiveDateTime>,
    pub status: i32,
    pub total: f64,
    pub items: Vec<OrderItemView>,
}

/// Bank ledger entry tagged by amount sign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialEntry {
    pub id: i64,
    pub label: String,
    pub amount: f64,
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Revenue,
    Expense,
}

impl EntryType {
    pub fn from_amount(amount: f64) -> Self {
        if amount > 0.0 {
            EntryType::Revenue
        } else {
            EntryType::Expense
        }
    }
}

/// Accepts a JSON number or a numeric string.
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(v),
        Raw::Float(v) => Ok(v as i64),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn lenient_f64_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
        None,
    }

    match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Num(v)) => Ok(Some(v)),
        Some(Raw::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed
                    .parse()
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
        Some(Raw::None) | None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dolibarr_products_parse_string_typed_numbers() {
        let raw: DolibarrProduct = serde_json::from_value(json!({
            "id": "42",
            "ref": "POM-AUT",
            "label": "Pommes Fruits Automne",
            "description": "Pommes de saison",
            "price": "2.50"
        }))
        .unwrap();

        let view: ProductView = raw.into();
        assert_eq!(view.id, 42);
        assert_eq!(view.price, 2.5);
        assert_eq!(view.season, Season::Automne);
        assert_eq!(view.category, Category::Fruits);
        assert_eq!(view.name, view.label);
    }

    #[test]
    fn dolibarr_products_parse_plain_numbers_and_missing_fields() {
        let raw: DolibarrProduct = serde_json::from_value(json!({
            "id": 7,
            "label": "Courges Légumes Hiver",
            "price": 3.2
        }))
        .unwrap();

        let view: ProductView = raw.into();
        assert_eq!(view.id, 7);
        assert_eq!(view.reference, "");
        assert_eq!(view.description, "");
        assert_eq!(view.season, Season::Hiver);
    }

    #[test]
    fn entry_type_follows_amount_sign() {
        assert_eq!(EntryType::from_amount(120.0), EntryType::Revenue);
        assert_eq!(EntryType::from_amount(-35.5), EntryType::Expense);
        // Zero is not revenue.
        assert_eq!(EntryType::from_amount(0.0), EntryType::Expense);
    }

    #[test]
    fn product_view_serializes_ref_field() {
        let view = ProductView::from_parts(1, "REF".into(), "Miel".into(), String::new(), 8.0);
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["ref"], "REF");
        assert_eq!(value["season"], "Inconnu");
        assert_eq!(value["category"], "Inconnu");
    }
}
