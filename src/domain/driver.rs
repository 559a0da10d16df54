// Driver and trip domain models - the entities the persistence layer stores
use super::eld_log::DailyLog;
use super::hos::Violation;
use super::route::RoutePlan;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub license_number: String,
    pub current_cycle_hours: f64,
    pub created_at: DateTime<Utc>,
}

impl Driver {
    pub fn new(name: String, license_number: String, current_cycle_hours: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            license_number,
            current_cycle_hours,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    #[default]
    Planned,
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub estimated_weight: u32,
    pub total_distance: Option<f64>,
    pub estimated_duration: Option<u32>,
    pub route_data: Option<RoutePlan>,
    pub status: TripStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// A planned trip with no route computed yet.
    pub fn new(
        driver_id: Uuid,
        current_location: String,
        pickup_location: String,
        dropoff_location: String,
        estimated_weight: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            driver_id,
            current_location,
            pickup_location,
            dropoff_location,
            estimated_weight,
            total_distance: None,
            estimated_duration: None,
            route_data: None,
            status: TripStatus::Planned,
            created_at: now,
            updated_at: now,
        }
    }

    /// A planned trip carrying its computed route.
    pub fn planned(
        driver_id: Uuid,
        current_location: String,
        pickup_location: String,
        dropoff_location: String,
        estimated_weight: u32,
        route: RoutePlan,
    ) -> Self {
        Self {
            total_distance: Some(route.total_distance),
            estimated_duration: Some(route.estimated_duration),
            route_data: Some(route),
            ..Self::new(
                driver_id,
                current_location,
                pickup_location,
                dropoff_location,
                estimated_weight,
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EldLogRecord {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub trip_id: Option<Uuid>,
    #[serde(flatten)]
    pub log: DailyLog,
    pub created_at: DateTime<Utc>,
}

impl EldLogRecord {
    pub fn new(driver_id: Uuid, trip_id: Option<Uuid>, log: DailyLog) -> Self {
        Self {
            id: Uuid::new_v4(),
            driver_id,
            trip_id,
            log,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HosViolationRecord {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub trip_id: Option<Uuid>,
    #[serde(flatten)]
    pub violation: Violation,
    pub timestamp: DateTime<Utc>,
    pub resolved: bool,
}

impl HosViolationRecord {
    pub fn new(driver_id: Uuid, trip_id: Option<Uuid>, violation: Violation) -> Self {
        Self {
            id: Uuid::new_v4(),
            driver_id,
            trip_id,
            violation,
            timestamp: Utc::now(),
            resolved: false,
        }
    }
}
