// Log service - stored ELD logs and their printable export
use crate::application::service_error::{FieldErrors, ServiceResult};
use crate::application::trucking_repository::TruckingRepository;
use crate::domain::driver::EldLogRecord;
use crate::domain::eld_log::{DailyLog, LogExport};
use crate::domain::regulations::{HOURS_PER_DAY, MINUTES_PER_DAY};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// A log entered by hand rather than synthesized from a trip plan.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLog {
    pub driver_id: Uuid,
    #[serde(default)]
    pub trip_id: Option<Uuid>,
    #[serde(flatten)]
    pub log: DailyLog,
}

impl NewLog {
    fn validate(&self) -> ServiceResult<()> {
        let log = &self.log;
        let mut errors = FieldErrors::default();
        errors.check(
            log.entries.iter().all(|e| u32::from(e.hour) < HOURS_PER_DAY),
            "time_entries: hour must be between 0 and 23",
        );
        errors.check(
            log.total_miles.is_finite() && log.total_miles >= 0.0,
            "total_miles: must not be negative",
        );
        for (field, minutes) in [
            ("driving_time", log.driving_minutes),
            ("on_duty_time", log.on_duty_minutes),
            ("off_duty_time", log.off_duty_minutes),
            ("sleeper_berth_time", log.sleeper_minutes),
        ] {
            errors.check(
                minutes <= MINUTES_PER_DAY,
                format!("{field}: must not exceed {MINUTES_PER_DAY} minutes"),
            );
        }
        errors.into_result()
    }
}

#[derive(Clone)]
pub struct LogService {
    repository: Arc<dyn TruckingRepository>,
}

impl LogService {
    pub fn new(repository: Arc<dyn TruckingRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> ServiceResult<Vec<EldLogRecord>> {
        Ok(self.repository.list_logs().await?)
    }

    pub async fn create(&self, new_log: NewLog) -> ServiceResult<EldLogRecord> {
        new_log.validate()?;
        self.repository
            .ensure_driver_and_trip(new_log.driver_id, new_log.trip_id)
            .await?;
        let record = self
            .repository
            .create_log(EldLogRecord::new(new_log.driver_id, new_log.trip_id, new_log.log))
            .await?;
        tracing::info!(log_id = %record.id, driver_id = %record.driver_id, "Recorded ELD log");
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        Ok(self.repository.delete_log(id).await?)
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<EldLogRecord> {
        Ok(self.repository.get_log(id).await?)
    }

    pub async fn export(&self, id: Uuid) -> ServiceResult<LogExport> {
        let record = self.repository.get_log(id).await?;
        let driver = self.repository.get_driver(record.driver_id).await?;
        Ok(LogExport::from_log(&record.log, &driver.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::eld_synthesizer::synthesize;
    use crate::domain::driver::Driver;
    use crate::application::service_error::ServiceError;
    use crate::application::trucking_repository::RepositoryError;
    use crate::domain::duty_status::{DutyStatus, HourlyEntry};
    use crate::infrastructure::memory_repository::InMemoryRepository;
    use chrono::{TimeZone, Utc};

    fn manual_log(driver_id: Uuid, trip_id: Option<Uuid>) -> NewLog {
        let start = Utc.with_ymd_and_hms(2024, 8, 10, 0, 0, 0).unwrap();
        NewLog {
            driver_id,
            trip_id,
            log: synthesize(start, 180.0, 3.0, "Tucson, AZ", "Yuma, AZ").remove(0),
        }
    }

    #[tokio::test]
    async fn test_export_uses_driver_name() {
        let repository = Arc::new(InMemoryRepository::new());
        let driver = repository
            .create_driver(Driver::new("Rosa Diaz".to_string(), "NM-77".to_string(), 0.0))
            .await
            .unwrap();
        let start = Utc.with_ymd_and_hms(2024, 8, 9, 7, 0, 0).unwrap();
        let log = synthesize(start, 330.5, 6.0, "Albuquerque, NM", "Phoenix, AZ").remove(0);
        let record = repository
            .create_log(EldLogRecord::new(driver.id, None, log))
            .await
            .unwrap();

        let service = LogService::new(repository);
        let export = service.export(record.id).await.unwrap();
        assert_eq!(export.driver_name, "Rosa Diaz");
        assert_eq!(export.date, "2024-08-09");
        assert_eq!(export.driving_time, "6h 0m");
        assert_eq!(export.on_duty_time, "8h 0m");
        assert_eq!(export.off_duty_time, "16h 0m");
        assert_eq!(export.total_miles, 330.5);

        assert!(service.export(Uuid::new_v4()).await.is_err());
    }

    #[tokio::test]
    async fn test_manual_log_is_listed_and_deleted() {
        let repository = Arc::new(InMemoryRepository::new());
        let driver = repository
            .create_driver(Driver::new("Rosa Diaz".to_string(), "NM-78".to_string(), 0.0))
            .await
            .unwrap();
        let service = LogService::new(repository);

        let record = service.create(manual_log(driver.id, None)).await.unwrap();
        assert_eq!(record.driver_id, driver.id);
        assert_eq!(record.log.driving_minutes, 180);
        assert_eq!(service.list().await.unwrap(), vec![record.clone()]);

        service.delete(record.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
        assert!(service.delete(record.id).await.is_err());
    }

    #[tokio::test]
    async fn test_manual_log_checks_driver_trip_and_hours() {
        let repository = Arc::new(InMemoryRepository::new());
        let driver = repository
            .create_driver(Driver::new("Rosa Diaz".to_string(), "NM-79".to_string(), 0.0))
            .await
            .unwrap();
        let service = LogService::new(repository);

        assert!(matches!(
            service.create(manual_log(Uuid::new_v4(), None)).await,
            Err(ServiceError::Repository(RepositoryError::NotFound { entity: "driver", .. }))
        ));
        assert!(matches!(
            service.create(manual_log(driver.id, Some(Uuid::new_v4()))).await,
            Err(ServiceError::Repository(RepositoryError::NotFound { entity: "trip", .. }))
        ));

        let mut bad = manual_log(driver.id, None);
        bad.log.entries.push(HourlyEntry::new(24, DutyStatus::OffDuty));
        bad.log.driving_minutes = 1500;
        match service.create(bad).await.unwrap_err() {
            ServiceError::InvalidRequest(messages) => assert_eq!(
                messages,
                vec![
                    "time_entries: hour must be between 0 and 23",
                    "driving_time: must not exceed 1440 minutes",
                ]
            ),
            other => panic!("expected invalid request, got {:?}", other),
        }
    }
}
