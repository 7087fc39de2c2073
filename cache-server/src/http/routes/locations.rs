//! Location endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::db::LocationFilter;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, QueryParams, ValidId};
use crate::http::server::AppState;
use crate::models::{Location, LocationInput, NewLocation};

/// Query string of `GET /locations`
#[derive(Debug, Default)]
pub struct ListLocationsParams {
    pub q: Option<String>,
}

impl From<QueryParams> for ListLocationsParams {
    fn from(params: QueryParams) -> Self {
        Self {
            q: params.first("q").map(str::to_owned),
        }
    }
}

impl From<ListLocationsParams> for LocationFilter {
    fn from(params: ListLocationsParams) -> Self {
        Self {
            search: params.q.filter(|q| !q.is_empty()),
        }
    }
}

/// GET /locations - list locations ordered by name, optionally searching
async fn list_locations(
    State(state): State<Arc<AppState>>,
    params: QueryParams,
) -> Result<Json<Vec<Location>>, ApiError> {
    let filter = LocationFilter::from(ListLocationsParams::from(params));
    let locations = state.locations.list(&filter).await?;
    Ok(Json(locations))
}

/// GET /locations/{id}
async fn get_location(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Location>, ApiError> {
    let location = state.locations.get(id).await?;
    Ok(Json(location))
}

/// POST /locations
async fn create_location(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<LocationInput>,
) -> Result<(StatusCode, Json<Location>), ApiError> {
    let location = NewLocation::try_from(input)?;
    let created = state.locations.create(location).await?;
    tracing::info!(id = created.id, "Created location");

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /locations/{id} - full replace of name and parent
async fn update_location(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    JsonBody(input): JsonBody<LocationInput>,
) -> Result<Json<Location>, ApiError> {
    let location = NewLocation::try_from(input)?;
    let updated = state.locations.update(id, location).await?;
    Ok(Json(updated))
}

/// DELETE /locations/{id}
async fn delete_location(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    state.locations.delete(id).await?;
    tracing::info!(id, "Deleted location");
    Ok(StatusCode::NO_CONTENT)
}

/// Location routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/locations", get(list_locations).post(create_location))
        .route(
            "/locations/{id}",
            get(get_location)
                .put(update_location)
                .delete(delete_location),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_search_means_no_filter() {
        let filter = LocationFilter::from(ListLocationsParams {
            q: Some(String::new()),
        });
        assert_eq!(filter, LocationFilter::default());

        let filter = LocationFilter::from(ListLocationsParams {
            q: Some("shelf".into()),
        });
        assert_eq!(filter.search.as_deref(), Some("shelf"));
    }

    #[test]
    fn first_search_term_wins() {
        let params = ListLocationsParams::from(QueryParams(vec![
            ("q".into(), "attic".into()),
            ("q".into(), "garage".into()),
        ]));
        assert_eq!(params.q.as_deref(), Some("attic"));
    }
}
