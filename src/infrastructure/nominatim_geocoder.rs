// Nominatim geocoder implementation
use crate::application::mapping_service::{Geocoder, MappingError};
use crate::domain::route::Coordinates;
use crate::infrastructure::config::GeocoderSettings;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(settings: &GeocoderSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build geocoder HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_search_url(&self, location: &str) -> String {
        format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(location)
        )
    }

    async fn search(&self, location: &str) -> Result<Vec<NominatimPlace>, String> {
        let url = self.build_search_url(location);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("HTTP status {}", response.status()));
        }

        response
            .json::<Vec<NominatimPlace>>()
            .await
            .map_err(|e| e.to_string())
    }
}

/// First search hit as coordinates; no hits means the place does not exist.
fn first_place(location: &str, places: Vec<NominatimPlace>) -> Result<Coordinates, MappingError> {
    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| MappingError::LocationNotFound(location.to_string()))?;

    let unavailable = |reason: String| MappingError::GeocodingUnavailable {
        location: location.to_string(),
        reason,
    };
    let latitude = place
        .lat
        .parse::<f64>()
        .map_err(|e| unavailable(format!("bad latitude {:?}: {}", place.lat, e)))?;
    let longitude = place
        .lon
        .parse::<f64>()
        .map_err(|e| unavailable(format!("bad longitude {:?}: {}", place.lon, e)))?;

    Ok(Coordinates::new(latitude, longitude))
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, location: &str) -> Result<Coordinates, MappingError> {
        tracing::debug!("Geocoding {}", location);

        let places = self.search(location).await.map_err(|reason| {
            tracing::error!("Geocoding request for {} failed: {}", location, reason);
            MappingError::GeocodingUnavailable {
                location: location.to_string(),
                reason,
            }
        })?;

        first_place(location, places)
    }
}
