// Application state for HTTP handlers
use crate::application::driver_service::DriverService;
use crate::application::log_service::LogService;
use crate::application::mapping_service::{Geocoder, RoutingService};
use crate::application::trip_planning_service::TripPlanningService;
use crate::application::trucking_repository::TruckingRepository;
use crate::application::violation_service::ViolationService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub driver_service: DriverService,
    pub trip_service: TripPlanningService,
    pub log_service: LogService,
    pub violation_service: ViolationService,
}

impl AppState {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        router: Arc<dyn RoutingService>,
        repository: Arc<dyn TruckingRepository>,
    ) -> Self {
        Self {
            driver_service: DriverService::new(repository.clone()),
            trip_service: TripPlanningService::new(geocoder, router, repository.clone()),
            log_service: LogService::new(repository.clone()),
            violation_service: ViolationService::new(repository),
        }
    }
}
