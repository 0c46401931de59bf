//! Shared library surface for the route server, CLI and tests.

pub mod api;
pub mod cache;
pub mod config;
pub mod service;
pub mod state;

pub use cache::{MemoryRouteCache, RouteCache};
pub use config::{Config, ConfigError};
pub use service::{RouteFetchService, RouteServiceError};
pub use state::AppState;
