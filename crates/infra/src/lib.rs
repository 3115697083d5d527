//! `stockpile-infra` — storage adapters for the inventory core.
//!
//! Two implementations of the repository port: Postgres (production) and
//! in-memory (tests/dev). Both translate every store failure into the
//! core's infrastructure error; neither retries.

pub mod repository;

pub use repository::{InMemoryInventoryRepository, PostgresInventoryRepository};
