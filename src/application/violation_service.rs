// Violation service - listing and resolving recorded HOS violations
use crate::application::service_error::{FieldErrors, ServiceResult};
use crate::application::trucking_repository::TruckingRepository;
use crate::domain::driver::HosViolationRecord;
use crate::domain::hos::{Severity, Violation, ViolationKind};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// A violation reported by hand; severity defaults to a warning.
#[derive(Debug, Clone, Deserialize)]
pub struct NewViolation {
    pub driver_id: Uuid,
    #[serde(default)]
    pub trip_id: Option<Uuid>,
    pub violation_type: ViolationKind,
    pub description: String,
    #[serde(default)]
    pub severity: Severity,
}

#[derive(Clone)]
pub struct ViolationService {
    repository: Arc<dyn TruckingRepository>,
}

impl ViolationService {
    pub fn new(repository: Arc<dyn TruckingRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> ServiceResult<Vec<HosViolationRecord>> {
        Ok(self.repository.list_violations().await?)
    }

    pub async fn record(&self, new_violation: NewViolation) -> ServiceResult<HosViolationRecord> {
        let mut errors = FieldErrors::default();
        errors.check(
            !new_violation.description.trim().is_empty(),
            "description: may not be blank",
        );
        errors.into_result()?;
        self.repository
            .ensure_driver_and_trip(new_violation.driver_id, new_violation.trip_id)
            .await?;

        let violation = Violation {
            kind: new_violation.violation_type,
            description: new_violation.description,
            severity: new_violation.severity,
        };
        let record = self
            .repository
            .create_violation(HosViolationRecord::new(
                new_violation.driver_id,
                new_violation.trip_id,
                violation,
            ))
            .await?;
        tracing::info!(violation_id = %record.id, driver_id = %record.driver_id, "Recorded violation");
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        Ok(self.repository.delete_violation(id).await?)
    }

    pub async fn resolve(&self, id: Uuid) -> ServiceResult<HosViolationRecord> {
        let violation = self.repository.resolve_violation(id).await?;
        tracing::info!(violation_id = %id, driver_id = %violation.driver_id, "Resolved violation");
        Ok(violation)
    }
}
