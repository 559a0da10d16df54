// Repository trait for drivers, trips, ELD logs and HOS violations
use crate::domain::driver::{Driver, EldLogRecord, HosViolationRecord, Trip, TripStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("license number already registered: {0}")]
    DuplicateLicense(String),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Inclusive bounds on `log_date`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.is_none_or(|s| at >= s) && self.end.is_none_or(|e| at <= e)
    }
}

#[async_trait]
pub trait TruckingRepository: Send + Sync {
    async fn create_driver(&self, driver: Driver) -> RepositoryResult<Driver>;
    async fn get_driver(&self, id: Uuid) -> RepositoryResult<Driver>;
    async fn find_driver_by_license(&self, license_number: &str) -> RepositoryResult<Driver>;
    async fn list_drivers(&self) -> RepositoryResult<Vec<Driver>>;
    async fn update_cycle_hours(&self, id: Uuid, cycle_hours: f64) -> RepositoryResult<Driver>;
    /// Removes the driver along with their trips, logs and violations.
    async fn delete_driver(&self, id: Uuid) -> RepositoryResult<()>;

    async fn create_trip(&self, trip: Trip) -> RepositoryResult<Trip>;
    async fn get_trip(&self, id: Uuid) -> RepositoryResult<Trip>;
    async fn list_trips(&self) -> RepositoryResult<Vec<Trip>>;
    /// Newest first.
    async fn trips_for_driver(&self, driver_id: Uuid) -> RepositoryResult<Vec<Trip>>;
    async fn update_trip_status(&self, id: Uuid, status: TripStatus) -> RepositoryResult<Trip>;
    /// Logs and violations of the trip are kept and lose their trip link.
    async fn delete_trip(&self, id: Uuid) -> RepositoryResult<()>;

    async fn create_log(&self, log: EldLogRecord) -> RepositoryResult<EldLogRecord>;
    async fn get_log(&self, id: Uuid) -> RepositoryResult<EldLogRecord>;
    /// Newest `log_date` first.
    async fn list_logs(&self) -> RepositoryResult<Vec<EldLogRecord>>;
    async fn delete_log(&self, id: Uuid) -> RepositoryResult<()>;
    /// Newest `log_date` first.
    async fn logs_for_driver(&self, driver_id: Uuid, range: DateRange) -> RepositoryResult<Vec<EldLogRecord>>;
    /// Newest `log_date` first.
    async fn logs_for_trip(&self, trip_id: Uuid) -> RepositoryResult<Vec<EldLogRecord>>;
    async fn latest_log_for_driver(&self, driver_id: Uuid) -> RepositoryResult<Option<EldLogRecord>>;

    async fn create_violation(&self, violation: HosViolationRecord) -> RepositoryResult<HosViolationRecord>;
    /// Newest first.
    async fn list_violations(&self) -> RepositoryResult<Vec<HosViolationRecord>>;
    /// Unresolved only, newest first.
    async fn open_violations_for_driver(&self, driver_id: Uuid) -> RepositoryResult<Vec<HosViolationRecord>>;
    async fn resolve_violation(&self, id: Uuid) -> RepositoryResult<HosViolationRecord>;
    async fn delete_violation(&self, id: Uuid) -> RepositoryResult<()>;

    /// Looks up the driver, then the trip when one is named.
    async fn ensure_driver_and_trip(&self, driver_id: Uuid, trip_id: Option<Uuid>) -> RepositoryResult<()> {
        self.get_driver(driver_id).await?;
        if let Some(trip_id) = trip_id {
            self.get_trip(trip_id).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_range_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 3, 0, 0, 0).unwrap();
        let range = DateRange {
            start: Some(start),
            end: Some(end),
        };

        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(!range.contains(end + chrono::Duration::seconds(1)));
        assert!(DateRange::default().contains(start));
    }
}
