//! Application services: stock query, stock upsert, and record
//! maintenance. Each service receives its repository as an explicit
//! constructor argument; there is no ambient registry.

use crate::error::{InfrastructureError, InventoryError, InventoryResult};
use crate::inventory::Inventory;
use crate::port::InventoryRepository;

/// Answers "is there at least N units of SKU S in stock".
///
/// A pure pass-through over the port's existence check: no quantity
/// validation, no caching. Store failures propagate unchanged to the
/// caller.
pub struct CheckStockService<R> {
    repository: R,
}

impl<R: InventoryRepository> CheckStockService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Only `sku_code` and `quantity` of the request matter; an `id`, if
    /// present, is ignored. A zero-quantity query is valid and is true
    /// exactly when any record for the SKU exists.
    pub async fn is_in_stock(&self, request: &Inventory) -> Result<bool, InfrastructureError> {
        self.repository
            .exists_with_minimum_quantity(&request.sku_code, request.quantity)
            .await
    }
}

/// Adds stock for a SKU: creates the record on first sight, accumulates
/// quantity afterwards.
pub struct AddInventoryService<R> {
    repository: R,
}

impl<R: InventoryRepository> AddInventoryService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Upsert with merge: repeated calls for one SKU accumulate quantity
    /// rather than overwrite it. Negative request quantities are
    /// rejected. `request.id` is ignored; the operation is keyed by SKU
    /// and is never an overwrite by id.
    pub async fn add_inventory(&self, request: Inventory) -> InventoryResult<Inventory> {
        if request.quantity < 0 {
            return Err(InventoryError::negative_quantity(request.quantity));
        }

        let persisted = self
            .repository
            .upsert_add(&request.sku_code, request.quantity)
            .await?;
        tracing::debug!(sku_code = %persisted.sku_code, quantity = persisted.quantity, "stock added");
        Ok(persisted)
    }

    /// Sequential upserts in request order; the first failure aborts the
    /// remainder.
    pub async fn add_many(&self, requests: Vec<Inventory>) -> InventoryResult<Vec<Inventory>> {
        let mut persisted = Vec::with_capacity(requests.len());
        for request in requests {
            persisted.push(self.add_inventory(request).await?);
        }
        Ok(persisted)
    }
}

/// Maintenance operations over the record set: list, fetch, overwrite,
/// delete. Kept apart from the two stock paths because these are keyed by
/// id and overwrite intentionally.
pub struct InventoryAdminService<R> {
    repository: R,
}

impl<R: InventoryRepository> InventoryAdminService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self) -> Result<Vec<Inventory>, InfrastructureError> {
        self.repository.list_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Inventory>, InfrastructureError> {
        self.repository.find_by_id(id).await
    }

    pub async fn get_by_sku(
        &self,
        sku_code: &str,
    ) -> Result<Option<Inventory>, InfrastructureError> {
        self.repository.find_by_sku(sku_code).await
    }

    /// Overwrite `sku_code` and `quantity` of the record with `id`. The
    /// id itself never changes.
    pub async fn update(&self, id: i64, request: Inventory) -> InventoryResult<Inventory> {
        let Some(existing) = self.repository.find_by_id(id).await? else {
            return Err(InventoryError::not_found(id));
        };

        let updated = Inventory {
            sku_code: request.sku_code,
            quantity: request.quantity,
            ..existing
        };
        Ok(self.repository.save(updated).await?)
    }

    pub async fn delete(&self, id: i64) -> InventoryResult<()> {
        if self.repository.delete_by_id(id).await? {
            Ok(())
        } else {
            Err(InventoryError::not_found(id))
        }
    }
}
