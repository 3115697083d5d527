//! Error taxonomy for the inventory core.

use thiserror::Error;

/// Result type used across the application services.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Failure originating from the persistence boundary rather than from
/// domain rules.
///
/// Adapters translate every underlying store failure into this type,
/// keeping the original cause attached; the services propagate it
/// untouched. Callers switch on the kind, not on a type hierarchy.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// The store could not be reached or failed unexpectedly
    /// (connectivity, query error, or anything unclassified).
    #[error("database connection failure during {operation}")]
    DatabaseConnection {
        /// Port operation that failed, e.g. `exists_with_minimum_quantity`.
        operation: &'static str,
        /// SKU involved, where the operation had one.
        sku_code: Option<String>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl InfrastructureError {
    pub fn database_connection(
        operation: &'static str,
        sku_code: Option<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::DatabaseConnection {
            operation,
            sku_code,
            source: source.into(),
        }
    }

    /// SKU attached to this failure, if the failed operation had one.
    pub fn sku_code(&self) -> Option<&str> {
        match self {
            Self::DatabaseConnection { sku_code, .. } => sku_code.as_deref(),
        }
    }
}

/// Service-level error.
///
/// The query path never produces a domain error: absence is expressed as
/// `false` or `None`, not as a failure.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A request asked to add a negative quantity.
    #[error("quantity must be non-negative, got {quantity}")]
    NegativeQuantity { quantity: i64 },

    /// A maintenance operation referenced an id that does not exist.
    #[error("no inventory record with id {id}")]
    NotFound { id: i64 },

    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

impl InventoryError {
    pub fn negative_quantity(quantity: i64) -> Self {
        Self::NegativeQuantity { quantity }
    }

    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }
}
