//! runroute core - route model and normalization
//!
//! Request/response types shared by the routing client and the route
//! fetch service, cache key derivation, and the flattening of the
//! upstream segmented geometry into a display-ready coordinate list.

pub mod cache_key;
pub mod error;
pub mod models;
pub mod normalize;
pub mod route_types;

pub use cache_key::CacheKey;
pub use error::MalformedResponseError;
pub use models::{
    EmbeddedRoutes, ExternalRoute, ExternalRouteResponse, LatLong, LocationKey, NormalizedRoute, RouteDefaults,
    RouteGeometry, RouteRequest, RouteSegment, SegmentSection,
};
pub use normalize::normalize;
pub use route_types::{RouteType, ROUTE_TYPES};
