//! Products and their denormalized stock view.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, WarehouseId};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Free-form category string.
    pub product_type: String,
    /// Non-negative unit price.
    pub price: Decimal,
    #[serde(default)]
    pub product_description: Option<String>,
    /// Warehouses currently holding more than zero units.
    ///
    /// Derived and denormalized server-side; stale the moment a local
    /// mutation touches stock. Re-fetch rather than patching it.
    #[serde(default)]
    pub warehouses_with_stock: Vec<WarehouseId>,
}

impl Product {
    /// Whether the backend reported stock at the given warehouse on the
    /// last fetch.
    #[must_use]
    pub fn stocked_at(&self, warehouse_id: WarehouseId) -> bool {
        self.warehouses_with_stock.contains(&warehouse_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stocked_at() {
        let product = Product {
            id: ProductId::new(1),
            name: "Strapping tape".to_string(),
            product_type: "consumable".to_string(),
            price: Decimal::new(450, 2),
            product_description: None,
            warehouses_with_stock: vec![WarehouseId::new(1), WarehouseId::new(3)],
        };
        assert!(product.stocked_at(WarehouseId::new(3)));
        assert!(!product.stocked_at(WarehouseId::new(2)));
    }

    #[test]
    fn test_product_deserializes_without_optional_fields() {
        let json = r#"{
            "id": 9,
            "name": "Shrink wrap",
            "product_type": "consumable",
            "price": "12.50"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.product_description.is_none());
        assert!(product.warehouses_with_stock.is_empty());
    }
}
