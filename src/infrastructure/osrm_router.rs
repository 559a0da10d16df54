// OSRM routing implementation
use crate::application::mapping_service::{MappingError, RoutingService};
use crate::domain::route::{Coordinates, RouteGeometry};
use crate::infrastructure::config::RoutingSettings;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const METERS_PER_MILE: f64 = 1609.34;

#[derive(Debug, Clone)]
pub struct OsrmRouter {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

impl OsrmRouter {
    pub fn new(settings: &RoutingSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build routing HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_route_url(&self, waypoints: &[Coordinates]) -> String {
        let path: Vec<String> = waypoints.iter().map(Coordinates::to_lon_lat).collect();
        format!(
            "{}/route/v1/driving/{}?overview=full&geometries=geojson&steps=true",
            self.base_url,
            path.join(";")
        )
    }
}

/// First route converted to miles and minutes.
fn first_route(response: OsrmResponse) -> Result<RouteGeometry, MappingError> {
    if response.code != "Ok" {
        tracing::warn!("OSRM returned code {}", response.code);
        return Err(MappingError::NoRouteFound);
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(MappingError::NoRouteFound)?;

    Ok(RouteGeometry {
        coordinates: route.geometry.coordinates,
        distance_miles: route.distance / METERS_PER_MILE,
        duration_minutes: route.duration / 60.0,
    })
}

#[async_trait]
impl RoutingService for OsrmRouter {
    async fn route(&self, waypoints: &[Coordinates]) -> Result<RouteGeometry, MappingError> {
        let url = self.build_route_url(waypoints);
        tracing::debug!("Requesting route: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MappingError::RoutingUnavailable(e.to_string()))?;

        // OSRM answers unroutable requests with a 4xx carrying a JSON code.
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MappingError::RoutingUnavailable(e.to_string()))?;

        match serde_json::from_str::<OsrmResponse>(&body) {
            Ok(parsed) => first_route(parsed),
            Err(_) if !status.is_success() => Err(MappingError::RoutingUnavailable(format!(
                "HTTP status {}: {}",
                status, body
            ))),
            Err(e) => Err(MappingError::RoutingUnavailable(format!(
                "Failed to parse OSRM response: {}",
                e
            ))),
        }
    }
}
