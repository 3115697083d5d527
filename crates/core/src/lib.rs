//! `stockpile-core` — inventory domain logic.
//!
//! This crate contains the pure core of the service: the `Inventory`
//! entity, the repository port, and the application services built on it.
//! No HTTP, no storage; adapters live in `stockpile-infra`.

pub mod error;
pub mod inventory;
pub mod port;
pub mod service;

pub use error::{InfrastructureError, InventoryError, InventoryResult};
pub use inventory::Inventory;
pub use port::InventoryRepository;
pub use service::{AddInventoryService, CheckStockService, InventoryAdminService};
