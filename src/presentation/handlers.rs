// HTTP request handlers
use crate::application::driver_service::{CycleHoursUpdate, NewDriver};
use crate::application::log_service::NewLog;
use crate::application::service_error::ServiceError;
use crate::application::trip_planning_service::{NewTrip, TripPlan, TripPlanRequest};
use crate::application::violation_service::NewViolation;
use crate::application::trucking_repository::DateRange;
use crate::domain::driver::{Driver, EldLogRecord, HosViolationRecord, Trip, TripStatus};
use crate::domain::eld_log::LogExport;
use crate::domain::hos::HosStatusView;
use crate::presentation::app_state::AppState;
use crate::presentation::error_response::ApiError;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Deserialize)]
pub struct LogRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Deserialize)]
pub struct TripStatusUpdate {
    pub status: TripStatus,
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_bound(field: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, String> {
    let Some(value) = value else {
        return Ok(None);
    };
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(at.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| format!("{field}: expected an ISO 8601 date, got {value:?}"))
}

impl LogRangeQuery {
    fn to_range(&self) -> Result<DateRange, ApiError> {
        let start = parse_bound("start_date", self.start_date.as_deref());
        let end = parse_bound("end_date", self.end_date.as_deref());
        match (start, end) {
            (Ok(start), Ok(end)) => Ok(DateRange { start, end }),
            (start, end) => {
                let messages = [start.err(), end.err()].into_iter().flatten().collect();
                Err(ApiError::invalid("Invalid date range", messages))
            }
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ServiceError {
    ServiceError::InvalidRequest(vec![rejection.body_text()])
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn list_drivers(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Driver>> {
    Ok(Json(state.driver_service.list().await?))
}

pub async fn create_driver(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewDriver>, JsonRejection>,
) -> Result<(StatusCode, Json<Driver>), ApiError> {
    let Json(new_driver) = payload.map_err(json_rejection)?;
    let driver = state.driver_service.register(new_driver).await?;
    Ok((StatusCode::CREATED, Json(driver)))
}

pub async fn get_driver(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> ApiResult<Driver> {
    Ok(Json(state.driver_service.get(id).await?))
}

pub async fn update_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    payload: Result<Json<CycleHoursUpdate>, JsonRejection>,
) -> ApiResult<Driver> {
    let Json(update) = payload.map_err(json_rejection)?;
    Ok(Json(state.driver_service.update_cycle_hours(id, update).await?))
}

pub async fn delete_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.driver_service.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn driver_by_license(
    State(state): State<Arc<AppState>>,
    Path(license_number): Path<String>,
) -> ApiResult<Driver> {
    Ok(Json(state.driver_service.by_license(&license_number).await?))
}

pub async fn driver_hos_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<HosStatusView> {
    Ok(Json(state.driver_service.hos_status(id).await?))
}

pub async fn driver_violations(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<HosViolationRecord>> {
    Ok(Json(state.driver_service.open_violations(id).await?))
}

pub async fn driver_trips(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> ApiResult<Vec<Trip>> {
    Ok(Json(state.driver_service.trips(id).await?))
}

pub async fn driver_logs(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<LogRangeQuery>,
) -> ApiResult<Vec<EldLogRecord>> {
    let range = query.to_range()?;
    Ok(Json(state.driver_service.logs(id, range).await?))
}

pub async fn list_trips(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Trip>> {
    Ok(Json(state.trip_service.list_trips().await?))
}

pub async fn create_trip(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewTrip>, JsonRejection>,
) -> Result<(StatusCode, Json<Trip>), ApiError> {
    let Json(new_trip) = payload.map_err(json_rejection)?;
    let trip = state.trip_service.create_trip(new_trip).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

/// Plan a trip: route, stops, ELD logs, HOS status and violations
pub async fn calculate_trip(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TripPlanRequest>, JsonRejection>,
) -> ApiResult<TripPlan> {
    let Json(request) = payload
        .map_err(json_rejection)
        .map_err(ApiError::trip_planning)?;
    let plan = state
        .trip_service
        .plan_trip(request)
        .await
        .map_err(ApiError::trip_planning)?;
    Ok(Json(plan))
}

pub async fn get_trip(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> ApiResult<Trip> {
    Ok(Json(state.trip_service.get_trip(id).await?))
}

pub async fn update_trip_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    payload: Result<Json<TripStatusUpdate>, JsonRejection>,
) -> ApiResult<Trip> {
    let Json(update) = payload.map_err(json_rejection)?;
    Ok(Json(state.trip_service.set_status(id, update.status).await?))
}

pub async fn delete_trip(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.trip_service.delete_trip(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn trip_logs(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<EldLogRecord>> {
    Ok(Json(state.trip_service.trip_logs(id).await?))
}

pub async fn list_logs(State(state): State<Arc<AppState>>) -> ApiResult<Vec<EldLogRecord>> {
    Ok(Json(state.log_service.list().await?))
}

/// Record a manually entered daily log
pub async fn create_log(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewLog>, JsonRejection>,
) -> Result<(StatusCode, Json<EldLogRecord>), ApiError> {
    let Json(new_log) = payload.map_err(json_rejection)?;
    let record = state.log_service.create(new_log).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn delete_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.log_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_log(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> ApiResult<EldLogRecord> {
    Ok(Json(state.log_service.get(id).await?))
}

/// Printable projection of a log for the PDF renderer
pub async fn log_pdf(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> ApiResult<LogExport> {
    Ok(Json(state.log_service.export(id).await?))
}

pub async fn list_violations(State(state): State<Arc<AppState>>) -> ApiResult<Vec<HosViolationRecord>> {
    Ok(Json(state.violation_service.list().await?))
}

pub async fn create_violation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewViolation>, JsonRejection>,
) -> Result<(StatusCode, Json<HosViolationRecord>), ApiError> {
    let Json(new_violation) = payload.map_err(json_rejection)?;
    let record = state.violation_service.record(new_violation).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn delete_violation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.violation_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn resolve_violation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Value> {
    state.violation_service.resolve(id).await?;
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bound_accepts_dates_and_timestamps() {
        let day = parse_bound("start_date", Some("2024-04-02")).unwrap().unwrap();
        assert_eq!(day.to_rfc3339(), "2024-04-02T00:00:00+00:00");

        let ts = parse_bound("end_date", Some("2024-04-02T10:30:00Z")).unwrap().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-04-02T10:30:00+00:00");

        assert_eq!(parse_bound("end_date", None).unwrap(), None);
        assert!(parse_bound("end_date", Some("yesterday")).is_err());
    }

    #[test]
    fn test_range_reports_both_bad_bounds() {
        let query = LogRangeQuery {
            start_date: Some("soon".to_string()),
            end_date: Some("later".to_string()),
        };
        let err = query.to_range().unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.details.as_array().map(|a| a.len()), Some(2));
    }
}
