//! API routes for the route server.

pub mod request_id;
mod routes;

use axum::Router;

pub use routes::RouteQuery;

pub fn routes() -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router()
}
