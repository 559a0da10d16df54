// Errors surfaced by the application services
use crate::application::mapping_service::MappingError;
use crate::application::trucking_repository::RepositoryError;
use crate::domain::regulations::CYCLE_LIMIT_HOURS;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid request: {}", .0.join("; "))]
    InvalidRequest(Vec<String>),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Collects field problems so a request reports all of them at once.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<String>);

impl FieldErrors {
    pub fn check(&mut self, ok: bool, message: impl Into<String>) {
        if !ok {
            self.0.push(message.into());
        }
    }

    pub fn check_text(&mut self, field: &str, value: &str, max_len: usize) {
        self.check(!value.trim().is_empty(), format!("{field}: may not be blank"));
        self.check(
            value.chars().count() <= max_len,
            format!("{field}: ensure this field has no more than {max_len} characters"),
        );
    }

    /// Hours used in the 70-hour cycle, stored with two decimal places.
    pub fn check_cycle_hours(&mut self, hours: f64) {
        self.check(
            (0.0..=CYCLE_LIMIT_HOURS).contains(&hours),
            "current_cycle_hours: must be between 0 and 70",
        );
        self.check(
            fits_decimal_places(hours, 2),
            "current_cycle_hours: ensure that there are no more than 2 decimal places",
        );
    }

    pub fn into_result(self) -> ServiceResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::InvalidRequest(self.0))
        }
    }
}

/// Whether `value` is representable with at most `places` decimal digits.
pub fn fits_decimal_places(value: f64, places: i32) -> bool {
    let scaled = value * 10f64.powi(places);
    scaled.is_finite() && (scaled - scaled.round()).abs() < 1e-6
}
