//! Warehouses.

use serde::{Deserialize, Serialize};

use super::id::WarehouseId;

/// A warehouse location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warehouse_deserializes_null_address() {
        let json = r#"{"id": 1, "name": "North hub", "address": null}"#;
        let warehouse: Warehouse = serde_json::from_str(json).unwrap();
        assert_eq!(warehouse.name, "North hub");
        assert!(warehouse.address.is_none());
    }
}
