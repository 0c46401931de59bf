//! Catalogue of route types offered to users.

use serde::Serialize;

/// A selectable route type and its upstream `routetype` id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteType {
    pub id: i64,
    pub name: &'static str,
}

pub const ROUTE_TYPES: [RouteType; 3] = [
    RouteType {
        id: 69,
        name: "Recreative",
    },
    RouteType {
        id: 65,
        name: "Nature",
    },
    RouteType {
        id: 66,
        name: "Avoid cars",
    },
];

impl RouteType {
    /// The type selected when the user has not picked one.
    pub fn default_type() -> RouteType {
        ROUTE_TYPES[0]
    }

    pub fn find(id: i64) -> Option<RouteType> {
        ROUTE_TYPES.iter().copied().find(|route_type| route_type.id == id)
    }
}
