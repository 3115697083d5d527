use axum::Router;

pub mod inventory;
pub mod system;

/// Router for all API endpoints.
pub fn router() -> Router {
    Router::new().merge(inventory::router())
}
