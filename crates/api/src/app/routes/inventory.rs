use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/api/inventory/check-stock", get(check_stock))
        .route("/api/inventory/add", post(add_inventory))
        .route("/api/inventory/bulk", post(add_inventory_bulk))
        .route("/api/inventory", get(list_inventories))
        .route(
            "/api/inventory/:id",
            get(get_inventory).put(update_inventory).delete(delete_inventory),
        )
}

/// `GET /api/inventory/check-stock?skuCode=..&quantity=..` — plain
/// boolean body, as consumed by the order service.
pub async fn check_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::StockCheckParams>,
) -> axum::response::Response {
    let request = stockpile_core::Inventory::new(params.sku_code, params.quantity);

    match services.check_stock.is_in_stock(&request).await {
        Ok(in_stock) => (StatusCode::OK, Json(in_stock)).into_response(),
        Err(e) => errors::infrastructure_error_to_response(e),
    }
}

pub async fn add_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AddInventoryRequest>,
) -> axum::response::Response {
    match services.add_inventory.add_inventory(body.into_model()).await {
        Ok(persisted) => {
            (StatusCode::CREATED, Json(dto::inventory_to_json(&persisted))).into_response()
        }
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn add_inventory_bulk(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<Vec<dto::AddInventoryRequest>>,
) -> axum::response::Response {
    let requests = body.into_iter().map(dto::AddInventoryRequest::into_model).collect();

    match services.add_inventory.add_many(requests).await {
        Ok(persisted) => {
            (StatusCode::CREATED, Json(dto::inventories_to_json(&persisted))).into_response()
        }
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn list_inventories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.admin.list_all().await {
        Ok(all) => (StatusCode::OK, Json(dto::inventories_to_json(&all))).into_response(),
        Err(e) => errors::infrastructure_error_to_response(e),
    }
}

pub async fn get_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.admin.get_by_id(id).await {
        Ok(Some(inventory)) => {
            (StatusCode::OK, Json(dto::inventory_to_json(&inventory))).into_response()
        }
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("no inventory record with id {id}"),
        ),
        Err(e) => errors::infrastructure_error_to_response(e),
    }
}

pub async fn update_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(body): Json<dto::AddInventoryRequest>,
) -> axum::response::Response {
    match services.admin.update(id, body.into_model()).await {
        Ok(updated) => (StatusCode::OK, Json(dto::inventory_to_json(&updated))).into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn delete_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.admin.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::error_to_response(e),
    }
}
