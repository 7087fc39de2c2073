//! Item endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::db::ItemFilter;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, QueryParams, ValidId};
use crate::http::server::AppState;
use crate::models::{Item, ItemInput, NewItem};

/// Query string of `GET /items`
///
/// `location_id` stays a string until it becomes a filter, so a malformed
/// value is a 400 with our own message.
#[derive(Debug, Default)]
pub struct ListItemsParams {
    pub q: Option<String>,
    pub location_id: Option<String>,
}

impl From<QueryParams> for ListItemsParams {
    fn from(params: QueryParams) -> Self {
        Self {
            q: params.first("q").map(str::to_owned),
            location_id: params.first("location_id").map(str::to_owned),
        }
    }
}

impl TryFrom<ListItemsParams> for ItemFilter {
    type Error = ApiError;

    fn try_from(params: ListItemsParams) -> Result<Self, Self::Error> {
        let location_id = params
            .location_id
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<i64>())
            .transpose()
            .map_err(|_| ApiError::BadRequest("invalid location_id"))?;

        Ok(Self {
            search: params.q.filter(|q| !q.is_empty()),
            location_id,
        })
    }
}

/// GET /items - list items ordered by name, filtered by name and/or location
async fn list_items(
    State(state): State<Arc<AppState>>,
    params: QueryParams,
) -> Result<Json<Vec<Item>>, ApiError> {
    let filter = ItemFilter::try_from(ListItemsParams::from(params))?;
    let items = state.items.list(&filter).await?;
    Ok(Json(items))
}

/// GET /items/{id}
async fn get_item(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Item>, ApiError> {
    let item = state.items.get(id).await?;
    Ok(Json(item))
}

/// POST /items
async fn create_item(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<ItemInput>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = NewItem::try_from(input)?;
    let created = state.items.create(item).await?;
    tracing::info!(id = created.id, location_id = created.location_id, "Created item");

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /items/{id} - full replace of name and location
async fn update_item(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    JsonBody(input): JsonBody<ItemInput>,
) -> Result<Json<Item>, ApiError> {
    let item = NewItem::try_from(input)?;
    let updated = state.items.update(id, item).await?;
    Ok(Json(updated))
}

/// DELETE /items/{id}
async fn delete_item(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    state.items.delete(id).await?;
    tracing::info!(id, "Deleted item");
    Ok(StatusCode::NO_CONTENT)
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}
