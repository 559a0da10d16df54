// Error responses - maps service failures to JSON bodies and status codes
use crate::application::mapping_service::MappingError;
use crate::application::service_error::ServiceError;
use crate::application::trucking_repository::RepositoryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_error: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn invalid(error: &str, messages: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: error.to_string(),
                details: json!(messages),
                original_error: None,
            },
        }
    }

    /// Like the `From<ServiceError>` mapping, but names the payload a trip.
    pub fn trip_planning(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidRequest(messages) => Self::invalid("Invalid trip data", messages),
            other => other.into(),
        }
    }
}

/// User-facing headline and advice for a mapping failure.
fn mapping_messages(err: &MappingError) -> (&'static str, &'static str) {
    match err {
        MappingError::LocationNotFound(_) => (
            "Location not found",
            "One or more locations could not be found. Please check spelling and try common city names.",
        ),
        MappingError::GeocodingUnavailable { .. } => (
            "Address lookup service temporarily unavailable",
            "Our address lookup service is temporarily busy. Please try again in a moment or use major city names.",
        ),
        MappingError::NoRouteFound => (
            "No route available",
            "No driving route could be found between these locations. Please check the addresses.",
        ),
        MappingError::RoutingUnavailable(_) => (
            "Failed to calculate route",
            "Please check your locations and try again",
        ),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidRequest(messages) => Self::invalid("Invalid request data", messages),
            ServiceError::Mapping(mapping) => {
                let (error, details) = mapping_messages(&mapping);
                tracing::warn!("Trip planning failed: {}", mapping);
                Self {
                    status: StatusCode::BAD_REQUEST,
                    body: ErrorBody {
                        error: error.to_string(),
                        details: json!(details),
                        original_error: Some(mapping.to_string()),
                    },
                }
            }
            ServiceError::Repository(RepositoryError::NotFound { entity, id }) => Self {
                status: StatusCode::NOT_FOUND,
                body: ErrorBody {
                    error: format!("{} not found", capitalize(entity)),
                    details: json!(id),
                    original_error: None,
                },
            },
            ServiceError::Repository(err @ RepositoryError::DuplicateLicense(_)) => Self {
                status: StatusCode::CONFLICT,
                body: ErrorBody {
                    error: "Driver already exists".to_string(),
                    details: json!(err.to_string()),
                    original_error: None,
                },
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
