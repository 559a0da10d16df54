// Driver service - registration, HOS status and per-driver records
use crate::application::hos_evaluator::evaluate_status;
use crate::application::service_error::{FieldErrors, ServiceResult};
use crate::application::trucking_repository::{DateRange, TruckingRepository};
use crate::domain::driver::{Driver, EldLogRecord, HosViolationRecord, Trip};
use crate::domain::hos::HosStatusView;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct NewDriver {
    pub name: String,
    pub license_number: String,
    #[serde(default)]
    pub current_cycle_hours: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CycleHoursUpdate {
    pub current_cycle_hours: f64,
}

#[derive(Clone)]
pub struct DriverService {
    repository: Arc<dyn TruckingRepository>,
}

impl DriverService {
    pub fn new(repository: Arc<dyn TruckingRepository>) -> Self {
        Self { repository }
    }

    pub async fn register(&self, new_driver: NewDriver) -> ServiceResult<Driver> {
        let mut errors = FieldErrors::default();
        errors.check_text("name", &new_driver.name, 255);
        errors.check_text("license_number", &new_driver.license_number, 64);
        errors.check_cycle_hours(new_driver.current_cycle_hours);
        errors.into_result()?;

        let driver = Driver::new(
            new_driver.name.trim().to_string(),
            new_driver.license_number.trim().to_string(),
            new_driver.current_cycle_hours,
        );
        let driver = self.repository.create_driver(driver).await?;
        tracing::info!(driver_id = %driver.id, "Registered driver");
        Ok(driver)
    }

    pub async fn list(&self) -> ServiceResult<Vec<Driver>> {
        Ok(self.repository.list_drivers().await?)
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<Driver> {
        Ok(self.repository.get_driver(id).await?)
    }

    pub async fn by_license(&self, license_number: &str) -> ServiceResult<Driver> {
        Ok(self.repository.find_driver_by_license(license_number).await?)
    }

    pub async fn update_cycle_hours(&self, id: Uuid, update: CycleHoursUpdate) -> ServiceResult<Driver> {
        let mut errors = FieldErrors::default();
        errors.check_cycle_hours(update.current_cycle_hours);
        errors.into_result()?;
        Ok(self
            .repository
            .update_cycle_hours(id, update.current_cycle_hours)
            .await?)
    }

    pub async fn remove(&self, id: Uuid) -> ServiceResult<()> {
        self.repository.delete_driver(id).await?;
        tracing::info!(driver_id = %id, "Removed driver");
        Ok(())
    }

    /// Status from the driver's most recent log; a driver with no logs has
    /// the full daily allotment.
    pub async fn hos_status(&self, id: Uuid) -> ServiceResult<HosStatusView> {
        let driver = self.repository.get_driver(id).await?;
        let latest = self.repository.latest_log_for_driver(id).await?;
        let entries = latest.as_ref().map(|r| r.log.entries.as_slice()).unwrap_or_default();
        Ok(evaluate_status(entries, driver.current_cycle_hours).to_view())
    }

    pub async fn open_violations(&self, id: Uuid) -> ServiceResult<Vec<HosViolationRecord>> {
        self.repository.get_driver(id).await?;
        Ok(self.repository.open_violations_for_driver(id).await?)
    }

    pub async fn trips(&self, id: Uuid) -> ServiceResult<Vec<Trip>> {
        self.repository.get_driver(id).await?;
        Ok(self.repository.trips_for_driver(id).await?)
    }

    pub async fn logs(&self, id: Uuid, range: DateRange) -> ServiceResult<Vec<EldLogRecord>> {
        self.repository.get_driver(id).await?;
        Ok(self.repository.logs_for_driver(id, range).await?)
    }
}
