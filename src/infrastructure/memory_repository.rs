// In-memory repository implementation
use crate::application::trucking_repository::{
    DateRange, RepositoryError, RepositoryResult, TruckingRepository,
};
use crate::domain::driver::{Driver, EldLogRecord, HosViolationRecord, Trip, TripStatus};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    drivers: HashMap<Uuid, Driver>,
    trips: HashMap<Uuid, Trip>,
    logs: HashMap<Uuid, EldLogRecord>,
    violations: HashMap<Uuid, HosViolationRecord>,
}

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_logs_first(mut logs: Vec<EldLogRecord>) -> Vec<EldLogRecord> {
    logs.sort_by(|a, b| b.log.date.cmp(&a.log.date));
    logs
}

#[async_trait]
impl TruckingRepository for InMemoryRepository {
    async fn create_driver(&self, driver: Driver) -> RepositoryResult<Driver> {
        let mut tables = self.tables.write().await;
        if tables
            .drivers
            .values()
            .any(|d| d.license_number == driver.license_number)
        {
            return Err(RepositoryError::DuplicateLicense(driver.license_number));
        }
        tables.drivers.insert(driver.id, driver.clone());
        Ok(driver)
    }

    async fn get_driver(&self, id: Uuid) -> RepositoryResult<Driver> {
        self.tables
            .read()
            .await
            .drivers
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("driver", id))
    }

    async fn find_driver_by_license(&self, license_number: &str) -> RepositoryResult<Driver> {
        self.tables
            .read()
            .await
            .drivers
            .values()
            .find(|d| d.license_number == license_number)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("driver", license_number))
    }

    async fn list_drivers(&self) -> RepositoryResult<Vec<Driver>> {
        let mut drivers: Vec<Driver> = self.tables.read().await.drivers.values().cloned().collect();
        drivers.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(drivers)
    }

    async fn update_cycle_hours(&self, id: Uuid, cycle_hours: f64) -> RepositoryResult<Driver> {
        let mut tables = self.tables.write().await;
        let driver = tables
            .drivers
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("driver", id))?;
        driver.current_cycle_hours = cycle_hours;
        Ok(driver.clone())
    }

    async fn delete_driver(&self, id: Uuid) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        if tables.drivers.remove(&id).is_none() {
            return Err(RepositoryError::not_found("driver", id));
        }
        tables.trips.retain(|_, t| t.driver_id != id);
        tables.logs.retain(|_, l| l.driver_id != id);
        tables.violations.retain(|_, v| v.driver_id != id);
        Ok(())
    }

    async fn create_trip(&self, trip: Trip) -> RepositoryResult<Trip> {
        let mut tables = self.tables.write().await;
        if !tables.drivers.contains_key(&trip.driver_id) {
            return Err(RepositoryError::not_found("driver", trip.driver_id));
        }
        tables.trips.insert(trip.id, trip.clone());
        Ok(trip)
    }

    async fn get_trip(&self, id: Uuid) -> RepositoryResult<Trip> {
        self.tables
            .read()
            .await
            .trips
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("trip", id))
    }

    async fn list_trips(&self) -> RepositoryResult<Vec<Trip>> {
        let mut trips: Vec<Trip> = self.tables.read().await.trips.values().cloned().collect();
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trips)
    }

    async fn trips_for_driver(&self, driver_id: Uuid) -> RepositoryResult<Vec<Trip>> {
        let mut trips: Vec<Trip> = self
            .tables
            .read()
            .await
            .trips
            .values()
            .filter(|t| t.driver_id == driver_id)
            .cloned()
            .collect();
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trips)
    }

    async fn update_trip_status(&self, id: Uuid, status: TripStatus) -> RepositoryResult<Trip> {
        let mut tables = self.tables.write().await;
        let trip = tables
            .trips
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("trip", id))?;
        trip.status = status;
        trip.updated_at = Utc::now();
        Ok(trip.clone())
    }

    async fn delete_trip(&self, id: Uuid) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        if tables.trips.remove(&id).is_none() {
            return Err(RepositoryError::not_found("trip", id));
        }
        for log in tables.logs.values_mut().filter(|l| l.trip_id == Some(id)) {
            log.trip_id = None;
        }
        for violation in tables.violations.values_mut().filter(|v| v.trip_id == Some(id)) {
            violation.trip_id = None;
        }
        Ok(())
    }

    async fn create_log(&self, log: EldLogRecord) -> RepositoryResult<EldLogRecord> {
        let mut tables = self.tables.write().await;
        if !tables.drivers.contains_key(&log.driver_id) {
            return Err(RepositoryError::not_found("driver", log.driver_id));
        }
        tables.logs.insert(log.id, log.clone());
        Ok(log)
    }

    async fn get_log(&self, id: Uuid) -> RepositoryResult<EldLogRecord> {
        self.tables
            .read()
            .await
            .logs
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("log", id))
    }

    async fn list_logs(&self) -> RepositoryResult<Vec<EldLogRecord>> {
        let logs = self.tables.read().await.logs.values().cloned().collect();
        Ok(newest_logs_first(logs))
    }

    async fn delete_log(&self, id: Uuid) -> RepositoryResult<()> {
        self.tables
            .write()
            .await
            .logs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("log", id))
    }

    async fn logs_for_driver(&self, driver_id: Uuid, range: DateRange) -> RepositoryResult<Vec<EldLogRecord>> {
        let logs = self
            .tables
            .read()
            .await
            .logs
            .values()
            .filter(|l| l.driver_id == driver_id && range.contains(l.log.date))
            .cloned()
            .collect();
        Ok(newest_logs_first(logs))
    }

    async fn logs_for_trip(&self, trip_id: Uuid) -> RepositoryResult<Vec<EldLogRecord>> {
        let logs = self
            .tables
            .read()
            .await
            .logs
            .values()
            .filter(|l| l.trip_id == Some(trip_id))
            .cloned()
            .collect();
        Ok(newest_logs_first(logs))
    }

    async fn latest_log_for_driver(&self, driver_id: Uuid) -> RepositoryResult<Option<EldLogRecord>> {
        Ok(self
            .tables
            .read()
            .await
            .logs
            .values()
            .filter(|l| l.driver_id == driver_id)
            .max_by_key(|l| l.log.date)
            .cloned())
    }

    async fn create_violation(&self, violation: HosViolationRecord) -> RepositoryResult<HosViolationRecord> {
        let mut tables = self.tables.write().await;
        if !tables.drivers.contains_key(&violation.driver_id) {
            return Err(RepositoryError::not_found("driver", violation.driver_id));
        }
        tables.violations.insert(violation.id, violation.clone());
        Ok(violation)
    }

    async fn list_violations(&self) -> RepositoryResult<Vec<HosViolationRecord>> {
        let mut violations: Vec<HosViolationRecord> =
            self.tables.read().await.violations.values().cloned().collect();
        violations.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(violations)
    }

    async fn open_violations_for_driver(&self, driver_id: Uuid) -> RepositoryResult<Vec<HosViolationRecord>> {
        let mut violations: Vec<HosViolationRecord> = self
            .tables
            .read()
            .await
            .violations
            .values()
            .filter(|v| v.driver_id == driver_id && !v.resolved)
            .cloned()
            .collect();
        violations.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(violations)
    }

    async fn resolve_violation(&self, id: Uuid) -> RepositoryResult<HosViolationRecord> {
        let mut tables = self.tables.write().await;
        let violation = tables
            .violations
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("violation", id))?;
        violation.resolved = true;
        Ok(violation.clone())
    }

    async fn delete_violation(&self, id: Uuid) -> RepositoryResult<()> {
        self.tables
            .write()
            .await
            .violations
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("violation", id))
    }
}
