//! Core data models for route requests and results.

use serde::{Deserialize, Serialize};

/// Starting point of a route: a single location key or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocationKey {
    Single(String),
    Many(Vec<String>),
}

impl LocationKey {
    /// Location keys in request order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            LocationKey::Single(key) => vec![key.as_str()],
            LocationKey::Many(keys) => keys.iter().map(String::as_str).collect(),
        }
    }

    /// True when no non-blank key is present.
    pub fn is_blank(&self) -> bool {
        self.values().iter().all(|key| key.trim().is_empty())
    }
}

impl From<&str> for LocationKey {
    fn from(value: &str) -> Self {
        LocationKey::Single(value.to_string())
    }
}

impl From<String> for LocationKey {
    fn from(value: String) -> Self {
        LocationKey::Single(value)
    }
}

impl From<Vec<String>> for LocationKey {
    fn from(mut values: Vec<String>) -> Self {
        if values.len() == 1 {
            LocationKey::Single(values.remove(0))
        } else {
            LocationKey::Many(values)
        }
    }
}

/// Canonical parameter set for one routing query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    /// Requested route length in meters (> 0)
    pub distance_meters: f64,
    pub location_key: LocationKey,
    pub route_type_id: i64,
    pub preferences_mask: i64,
    pub speed: i64,
    pub random_seed: i64,
}

/// Service-wide tuning values applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefaults {
    pub speed: i64,
    pub preferences_mask: i64,
    pub random_seed: i64,
}

impl Default for RouteDefaults {
    fn default() -> Self {
        Self {
            speed: 12,
            preferences_mask: 63,
            random_seed: 800,
        }
    }
}

impl RouteRequest {
    /// Kilometers to meters, or `None` unless the result is finite and positive.
    pub fn meters_from_km(distance_km: f64) -> Option<f64> {
        let meters = distance_km * 1000.0;
        (meters.is_finite() && meters > 0.0).then_some(meters)
    }

    /// Build a request from user input, converting kilometers to meters.
    ///
    /// Callers taking untrusted input check it with [`Self::meters_from_km`]
    /// first; a huge kilometer value overflows to infinity here.
    pub fn from_km(
        distance_km: f64,
        route_type_id: i64,
        location_key: impl Into<LocationKey>,
        random_seed: Option<i64>,
        defaults: &RouteDefaults,
    ) -> Self {
        Self {
            distance_meters: distance_km * 1000.0,
            location_key: location_key.into(),
            route_type_id,
            preferences_mask: defaults.preferences_mask,
            speed: defaults.speed,
            random_seed: random_seed.unwrap_or(defaults.random_seed),
        }
    }

    /// Query parameters in the documented upstream order.
    ///
    /// `distance, locations, preferences, routetype, speed, randomseed`;
    /// a multi-location request repeats `locations` once per key.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("distance", self.distance_meters.to_string())];
        for key in self.location_key.values() {
            pairs.push(("locations", key.to_string()));
        }
        pairs.push(("preferences", self.preferences_mask.to_string()));
        pairs.push(("routetype", self.route_type_id.to_string()));
        pairs.push(("speed", self.speed.to_string()));
        pairs.push(("randomseed", self.random_seed.to_string()));
        pairs
    }
}

/// Raw routing payload as returned by the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalRouteResponse {
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedRoutes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedRoutes {
    #[serde(default)]
    pub routes: Vec<ExternalRoute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalRoute {
    /// Route duration in seconds
    pub routetime: f64,
    /// Route length in meters
    pub routelength: f64,
    #[serde(default)]
    pub routesegments: Vec<RouteSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    #[serde(default)]
    pub segmentsections: Vec<SegmentSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSection {
    pub geometry: RouteGeometry,
}

/// Section geometry; coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

impl ExternalRouteResponse {
    /// Wrap a list of routes in the upstream envelope.
    pub fn from_routes(routes: Vec<ExternalRoute>) -> Self {
        Self {
            embedded: EmbeddedRoutes { routes },
        }
    }

    pub fn routes(&self) -> &[ExternalRoute] {
        &self.embedded.routes
    }
}

/// A `(latitude, longitude)` pair; serialized as `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLong(pub f64, pub f64);

impl LatLong {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lon(&self) -> f64 {
        self.1
    }
}

/// Flattened, display-ready route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRoute {
    #[serde(rename = "time")]
    pub duration_seconds: f64,
    #[serde(rename = "length")]
    pub length_meters: f64,
    pub coordinates: Vec<LatLong>,
}
