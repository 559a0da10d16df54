// Router - maps URL paths to handlers
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::*;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/drivers", get(list_drivers).post(create_driver))
        .route(
            "/drivers/:id",
            get(get_driver).patch(update_driver).delete(delete_driver),
        )
        .route("/drivers/license/:license_number", get(driver_by_license))
        .route("/drivers/:id/hos-status", get(driver_hos_status))
        .route("/drivers/:id/violations", get(driver_violations))
        .route("/drivers/:id/trips", get(driver_trips))
        .route("/drivers/:id/logs", get(driver_logs))
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/calculate", post(calculate_trip))
        .route("/trips/:id", get(get_trip).delete(delete_trip))
        .route("/trips/:id/status", patch(update_trip_status))
        .route("/trips/:id/logs", get(trip_logs))
        .route("/logs", get(list_logs).post(create_log))
        .route("/logs/:id", get(get_log).delete(delete_log))
        .route("/logs/:id/pdf", get(log_pdf))
        .route("/violations", get(list_violations).post(create_violation))
        .route("/violations/:id", delete(delete_violation))
        .route("/violations/:id/resolve", patch(resolve_violation))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
