use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inventory record for a single SKU.
///
/// `id` is absent before persistence, assigned by the store on first
/// insert, and immutable afterwards. `sku_code` is the business key;
/// updates only ever touch `quantity`. `created_at`/`updated_at` are
/// store-managed audit fields, populated on values returned from a
/// repository and `None` on requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub id: Option<i64>,
    pub sku_code: String,
    pub quantity: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Inventory {
    /// A not-yet-persisted record, as supplied by callers of the add and
    /// check-stock paths.
    pub fn new(sku_code: impl Into<String>, quantity: i64) -> Self {
        Self {
            id: None,
            sku_code: sku_code.into(),
            quantity,
            created_at: None,
            updated_at: None,
        }
    }

    /// Merge step of the upsert: same identity, quantity increased by
    /// `additional`.
    pub fn with_added_quantity(mut self, additional: i64) -> Self {
        self.quantity += additional;
        self
    }
}
