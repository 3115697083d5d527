pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryInventoryRepository;
pub use postgres::PostgresInventoryRepository;
