//! Flattening of upstream route geometry.

use crate::error::MalformedResponseError;
use crate::models::{ExternalRouteResponse, LatLong, NormalizedRoute};

/// Flatten the first route of an upstream response.
///
/// Coordinates are emitted in segment → section → point order with each
/// `[lon, lat]` pair swapped to `(lat, lon)`. Points are never reordered or
/// deduplicated. Duration and length are copied without unit conversion.
pub fn normalize(
    response: &ExternalRouteResponse,
) -> Result<NormalizedRoute, MalformedResponseError> {
    let route = response
        .routes()
        .first()
        .ok_or(MalformedResponseError::NoRoutes)?;

    let coordinates = route
        .routesegments
        .iter()
        .flat_map(|segment| segment.segmentsections.iter())
        .flat_map(|section| section.geometry.coordinates.iter())
        .map(|&[lon, lat]| LatLong(lat, lon))
        .collect();

    Ok(NormalizedRoute {
        duration_seconds: route.routetime,
        length_meters: route.routelength,
        coordinates,
    })
}
