use serde::Deserialize;

use stockpile_core::Inventory;

// -------------------------
// Request DTOs
// -------------------------

/// Query parameters of the check-stock endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockCheckParams {
    pub sku_code: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddInventoryRequest {
    pub sku_code: String,
    pub quantity: i64,
}

impl AddInventoryRequest {
    pub fn into_model(self) -> Inventory {
        Inventory::new(self.sku_code, self.quantity)
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn inventory_to_json(inventory: &Inventory) -> serde_json::Value {
    serde_json::json!({
        "id": inventory.id,
        "skuCode": inventory.sku_code,
        "quantity": inventory.quantity,
        "createdAt": inventory.created_at.map(|t| t.to_rfc3339()),
        "updatedAt": inventory.updated_at.map(|t| t.to_rfc3339()),
    })
}

pub fn inventories_to_json(inventories: &[Inventory]) -> serde_json::Value {
    serde_json::Value::Array(inventories.iter().map(inventory_to_json).collect())
}
