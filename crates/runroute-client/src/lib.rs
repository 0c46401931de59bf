//! runroute client - upstream routing API client
//!
//! Handles all communication with the third-party routing service.

pub mod client;
pub mod error;

pub use client::{RouteSource, RoutingClient};
pub use error::FetchError;
