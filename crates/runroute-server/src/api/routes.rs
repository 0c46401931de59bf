//! REST API routes.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    middleware,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::request_id::{self, RequestId};
use crate::service::RouteServiceError;
use crate::state::AppState;
use runroute_core::{NormalizedRoute, RouteRequest, RouteType, ROUTE_TYPES};

type ApiError = (StatusCode, Json<Value>);

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/v1/route", get(get_route))
        .route("/v1/route-types", get(list_route_types))
        .layer(middleware::from_fn(request_id::ensure_request_id))
}

// === Request/Response types ===

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// Route length in kilometers
    pub distance: f64,
    /// Upstream route type id; the first catalogue entry when omitted
    pub routetype: Option<i64>,
    pub location: String,
    pub randomseed: Option<i64>,
}

// === Handlers ===

/// Generate a route for the given distance, type and starting point.
pub async fn get_route(
    State(state): State<Arc<AppState>>,
    request_id: Option<Extension<RequestId>>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Result<Json<NormalizedRoute>, ApiError> {
    let Query(query) = query.map_err(|rejection| bad_request(&rejection.body_text()))?;
    if RouteRequest::meters_from_km(query.distance).is_none() {
        return Err(bad_request("distance must be a positive number of kilometers"));
    }
    let location = query.location.trim();
    if location.is_empty() {
        return Err(bad_request("location must not be empty"));
    }

    let route_type_id = query
        .routetype
        .unwrap_or_else(|| RouteType::default_type().id);
    let service = state.service_for_request(request_id.map(|Extension(id)| id.0));

    let route = service
        .fetch_route(query.distance, route_type_id, location, query.randomseed)
        .await
        .map_err(service_error)?;

    tracing::info!(
        "Generated {} km route ({} points, type {})",
        query.distance,
        route.coordinates.len(),
        route_type_id
    );
    Ok(Json(route))
}

/// List the route types users can pick from.
pub async fn list_route_types() -> Json<Vec<RouteType>> {
    Json(ROUTE_TYPES.to_vec())
}

fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn service_error(err: RouteServiceError) -> ApiError {
    match err {
        RouteServiceError::Fetch(err) => {
            tracing::error!("Routing API request failed: {}", err);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "error": "Failed to fetch route",
                    "detail": err.to_string()
                })),
            )
        }
        RouteServiceError::Malformed(err) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "No route found",
                "detail": err.to_string()
            })),
        ),
    }
}
