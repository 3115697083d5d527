use std::sync::Arc;

use stockpile_core::{
    AddInventoryService, CheckStockService, InventoryAdminService, InventoryRepository,
};
use stockpile_infra::{InMemoryInventoryRepository, PostgresInventoryRepository};

type SharedRepository = Arc<dyn InventoryRepository>;

/// Application services, wired once at startup with an explicit
/// repository. Handlers receive this via `Extension`.
pub struct AppServices {
    pub check_stock: CheckStockService<SharedRepository>,
    pub add_inventory: AddInventoryService<SharedRepository>,
    pub admin: InventoryAdminService<SharedRepository>,
}

impl AppServices {
    pub fn new(repository: SharedRepository) -> Self {
        Self {
            check_stock: CheckStockService::new(repository.clone()),
            add_inventory: AddInventoryService::new(repository.clone()),
            admin: InventoryAdminService::new(repository),
        }
    }
}

/// Choose the backing store from the environment.
///
/// `USE_PERSISTENT_STORE=true` selects Postgres (requires
/// `DATABASE_URL`); anything else wires the in-memory repository
/// (dev/test).
pub async fn build_services() -> AppServices {
    let use_persistent = std::env::var("USE_PERSISTENT_STORE")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_persistent {
        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set when USE_PERSISTENT_STORE=true");

        let pool = sqlx::PgPool::connect(&database_url)
            .await
            .expect("failed to connect to Postgres");

        PostgresInventoryRepository::ensure_schema(&pool)
            .await
            .expect("failed to ensure inventory schema");

        tracing::info!("using Postgres inventory repository");
        return AppServices::new(Arc::new(PostgresInventoryRepository::new(pool)));
    }

    tracing::info!("using in-memory inventory repository");
    AppServices::new(Arc::new(InMemoryInventoryRepository::new()))
}
