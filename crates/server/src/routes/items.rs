use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service::items::{Item, ItemInput};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

/// Create an item; any `id` in the body is ignored.
#[utoipa::path(post, path = "/api/items", tag = "items", request_body = crate::openapi::ItemInputDoc, responses((status = 200, description = "Persisted item", body = crate::openapi::ItemDoc)))]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ItemInput>,
) -> Result<Json<Item>, JsonApiError> {
    let item = state.items.create(input).await?;
    Ok(Json(item))
}

/// List all items
#[utoipa::path(get, path = "/api/items", tag = "items", responses((status = 200, description = "All items", body = [crate::openapi::ItemDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Item>>, JsonApiError> {
    let items = state.items.list().await?;
    Ok(Json(items))
}

#[utoipa::path(get, path = "/api/items/{id}", tag = "items", params(("id" = i64, Path, description = "Item id")), responses((status = 200, description = "Item", body = crate::openapi::ItemDoc), (status = 404, description = "Not Found")))]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Response {
    match state.items.get(id).await {
        Ok(Some(item)) => Json(item).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => JsonApiError::from(e).into_response(),
    }
}

/// Overwrite name and description; both fields are required.
#[utoipa::path(put, path = "/api/items/{id}", tag = "items", params(("id" = i64, Path, description = "Item id")), request_body = crate::openapi::ItemInputDoc, responses((status = 200, description = "Updated item", body = crate::openapi::ItemDoc), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(input): Json<ItemInput>,
) -> Response {
    match state.items.update(id, input).await {
        Ok(Some(item)) => Json(item).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => JsonApiError::from(e).into_response(),
    }
}

#[utoipa::path(delete, path = "/api/items/{id}", tag = "items", params(("id" = i64, Path, description = "Item id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"), (status = 500, description = "Storage failure")))]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Response {
    match state.items.delete(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => JsonApiError::from(e).into_response(),
    }
}
