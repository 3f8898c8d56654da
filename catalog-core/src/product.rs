//! Product records as served by the remote catalog

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the remote catalog. Stable and unique per product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single catalog entry.
///
/// Only `id` carries an invariant; every other field is display data. `title`
/// is the one field the browser mutates, and only in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Some catalog entries (groceries, mostly) have no brand at all.
    #[serde(default)]
    pub brand: Option<String>,
    pub category: String,
    pub price: f64,
    pub rating: f64,
}

impl Product {
    pub fn brand_label(&self) -> &str {
        self.brand.as_deref().unwrap_or("")
    }

    /// Price rendered as a dollar amount with two decimals.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }

    pub fn display_rating(&self) -> String {
        format!("{:.2}", self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_remote_record_and_ignores_extra_fields() {
        let json = r#"{
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "Popular mascara",
            "category": "beauty",
            "price": 9.99,
            "discountPercentage": 7.17,
            "rating": 4.94,
            "stock": 5,
            "brand": "Essence"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.brand.as_deref(), Some("Essence"));
        assert_eq!(product.display_price(), "$9.99");
    }

    #[test]
    fn missing_brand_decodes_as_none() {
        let json = r#"{"id": 16, "title": "Apple", "category": "groceries", "price": 1.99, "rating": 4.19}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.brand.is_none());
        assert_eq!(product.brand_label(), "");
    }

    #[test]
    fn price_is_formatted_with_two_decimals() {
        let product = Product {
            id: ProductId::new(7),
            title: "Chair".to_string(),
            brand: None,
            category: "furniture".to_string(),
            price: 1899.0,
            rating: 3.5,
        };
        assert_eq!(product.display_price(), "$1899.00");
        assert_eq!(product.display_rating(), "3.50");
    }
}
