// Mapping collaborators - geocoding and road routing seams
use crate::domain::route::{Coordinates, RouteGeometry};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("Could not find location: {0}")]
    LocationNotFound(String),

    #[error("Geocoding failed for {location}: {reason}")]
    GeocodingUnavailable { location: String, reason: String },

    #[error("No route found between locations")]
    NoRouteFound,

    #[error("Route calculation failed: {0}")]
    RoutingUnavailable(String),
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a free-form place name to coordinates.
    async fn geocode(&self, location: &str) -> Result<Coordinates, MappingError>;
}

#[async_trait]
pub trait RoutingService: Send + Sync {
    /// Drive route visiting `waypoints` in order.
    async fn route(&self, waypoints: &[Coordinates]) -> Result<RouteGeometry, MappingError>;
}
