use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use stockpile_core::{InfrastructureError, Inventory, InventoryRepository};

/// In-memory inventory repository.
///
/// Intended for tests/dev. Not optimized for performance: SKU lookups
/// scan the map. Mirrors the Postgres adapter's contract, including the
/// SKU uniqueness the atomic upsert depends on.
#[derive(Debug, Default)]
pub struct InMemoryInventoryRepository {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    rows: HashMap<i64, Inventory>,
    next_id: i64,
}

impl Inner {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn find_by_sku(&self, sku_code: &str) -> Option<&Inventory> {
        self.rows.values().find(|r| r.sku_code == sku_code)
    }
}

impl InMemoryInventoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned(operation: &'static str, sku_code: Option<&str>) -> InfrastructureError {
        InfrastructureError::database_connection(
            operation,
            sku_code.map(str::to_owned),
            "lock poisoned".to_string(),
        )
    }
}

#[async_trait]
impl InventoryRepository for InMemoryInventoryRepository {
    async fn exists_with_minimum_quantity(
        &self,
        sku_code: &str,
        quantity: i64,
    ) -> Result<bool, InfrastructureError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| Self::poisoned("exists_with_minimum_quantity", Some(sku_code)))?;

        Ok(inner
            .rows
            .values()
            .any(|r| r.sku_code == sku_code && r.quantity >= quantity))
    }

    async fn find_by_sku(
        &self,
        sku_code: &str,
    ) -> Result<Option<Inventory>, InfrastructureError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| Self::poisoned("find_by_sku", Some(sku_code)))?;

        Ok(inner.find_by_sku(sku_code).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Inventory>, InfrastructureError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| Self::poisoned("find_by_id", None))?;

        Ok(inner.rows.get(&id).cloned())
    }

    async fn save(&self, inventory: Inventory) -> Result<Inventory, InfrastructureError> {
        let now = Utc::now();
        let mut inner = self
            .inner
            .write()
            .map_err(|_| Self::poisoned("save", Some(&inventory.sku_code)))?;

        match inventory.id {
            Some(id) => {
                let Some(existing) = inner.rows.get(&id) else {
                    return Err(InfrastructureError::database_connection(
                        "save",
                        Some(inventory.sku_code),
                        format!("no row with id {id}"),
                    ));
                };

                let persisted = Inventory {
                    id: Some(id),
                    created_at: existing.created_at,
                    updated_at: Some(now),
                    ..inventory
                };
                inner.rows.insert(id, persisted.clone());
                Ok(persisted)
            }
            None => {
                if inner.find_by_sku(&inventory.sku_code).is_some() {
                    // Same failure the unique index produces in Postgres.
                    return Err(InfrastructureError::database_connection(
                        "save",
                        Some(inventory.sku_code),
                        "duplicate sku_code".to_string(),
                    ));
                }

                let id = inner.assign_id();
                let persisted = Inventory {
                    id: Some(id),
                    created_at: Some(now),
                    updated_at: Some(now),
                    ..inventory
                };
                inner.rows.insert(id, persisted.clone());
                Ok(persisted)
            }
        }
    }

    async fn upsert_add(
        &self,
        sku_code: &str,
        quantity: i64,
    ) -> Result<Inventory, InfrastructureError> {
        let now = Utc::now();

        // Create-or-add under one write lock; the whole step is atomic
        // with respect to other callers.
        let mut inner = self
            .inner
            .write()
            .map_err(|_| Self::poisoned("upsert_add", Some(sku_code)))?;

        let (id, persisted) = match inner.find_by_sku(sku_code).cloned() {
            Some(existing) => {
                let id = existing.id.unwrap_or_default();
                let merged = Inventory {
                    updated_at: Some(now),
                    ..existing.with_added_quantity(quantity)
                };
                (id, merged)
            }
            None => {
                let id = inner.assign_id();
                let created = Inventory {
                    id: Some(id),
                    created_at: Some(now),
                    updated_at: Some(now),
                    ..Inventory::new(sku_code, quantity)
                };
                (id, created)
            }
        };

        inner.rows.insert(id, persisted.clone());
        Ok(persisted)
    }

    async fn list_all(&self) -> Result<Vec<Inventory>, InfrastructureError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| Self::poisoned("list_all", None))?;

        let mut all: Vec<Inventory> = inner.rows.values().cloned().collect();
        all.sort_by_key(|r| r.id);
        Ok(all)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, InfrastructureError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| Self::poisoned("delete_by_id", None))?;

        Ok(inner.rows.remove(&id).is_some())
    }
}
