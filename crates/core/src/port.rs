//! Repository port: the storage contract the services depend on.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::InfrastructureError;
use crate::inventory::Inventory;

/// Storage contract for inventory records.
///
/// Implementations live in adapter crates (`stockpile-infra`). Every
/// operation reports store failures as [`InfrastructureError`]; absence is
/// expressed with `Option`/`bool`, never as an error.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// True iff a record for `sku_code` exists with at least `quantity`
    /// units on hand. `quantity = 0` therefore answers "has this SKU ever
    /// been stocked". No side effects.
    async fn exists_with_minimum_quantity(
        &self,
        sku_code: &str,
        quantity: i64,
    ) -> Result<bool, InfrastructureError>;

    /// Current record for a SKU, or `None` when the SKU has never been
    /// stocked.
    async fn find_by_sku(&self, sku_code: &str)
        -> Result<Option<Inventory>, InfrastructureError>;

    /// Record by store-assigned id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Inventory>, InfrastructureError>;

    /// Insert when `id` is `None`, otherwise overwrite the record with
    /// that id. Returns the persisted form with id and timestamps
    /// populated.
    async fn save(&self, inventory: Inventory) -> Result<Inventory, InfrastructureError>;

    /// Atomic create-or-add keyed by SKU: inserts `{sku_code, quantity}`
    /// when no record exists, otherwise adds `quantity` to the existing
    /// record, preserving its id. Implementations must perform this as a
    /// single atomic step so that concurrent adds for the same SKU cannot
    /// lose updates.
    async fn upsert_add(
        &self,
        sku_code: &str,
        quantity: i64,
    ) -> Result<Inventory, InfrastructureError>;

    /// All records, ordered by id.
    async fn list_all(&self) -> Result<Vec<Inventory>, InfrastructureError>;

    /// Delete by id; true if a record existed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, InfrastructureError>;
}

#[async_trait]
impl<R> InventoryRepository for Arc<R>
where
    R: InventoryRepository + ?Sized,
{
    async fn exists_with_minimum_quantity(
        &self,
        sku_code: &str,
        quantity: i64,
    ) -> Result<bool, InfrastructureError> {
        (**self).exists_with_minimum_quantity(sku_code, quantity).await
    }

    async fn find_by_sku(
        &self,
        sku_code: &str,
    ) -> Result<Option<Inventory>, InfrastructureError> {
        (**self).find_by_sku(sku_code).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Inventory>, InfrastructureError> {
        (**self).find_by_id(id).await
    }

    async fn save(&self, inventory: Inventory) -> Result<Inventory, InfrastructureError> {
        (**self).save(inventory).await
    }

    async fn upsert_add(
        &self,
        sku_code: &str,
        quantity: i64,
    ) -> Result<Inventory, InfrastructureError> {
        (**self).upsert_add(sku_code, quantity).await
    }

    async fn list_all(&self) -> Result<Vec<Inventory>, InfrastructureError> {
        (**self).list_all().await
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, InfrastructureError> {
        (**self).delete_by_id(id).await
    }
}
