// Route domain models - coordinates, planned stops and routed geometry
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `"lon,lat"`, the waypoint form routing engines expect.
    pub fn to_lon_lat(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Pickup,
    Fuel,
    Rest,
    Dropoff,
}

impl StopKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopKind::Pickup => "pickup",
            StopKind::Fuel => "fuel",
            StopKind::Rest => "rest",
            StopKind::Dropoff => "dropoff",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: StopKind,
    #[serde(rename = "location")]
    pub location_label: String,
    pub coordinates: Coordinates,
    pub estimated_time: String,
    pub description: String,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    pub required: bool,
}

/// Output of a routing collaborator, already converted to miles and minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    /// GeoJSON-ordered `[lon, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
    pub distance_miles: f64,
    pub duration_minutes: f64,
}

/// Route stored with a trip and returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub coordinates: Vec<[f64; 2]>,
    pub total_distance: f64,
    pub estimated_duration: u32,
    pub stops: Vec<Stop>,
}
