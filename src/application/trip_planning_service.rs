// Trip planning service - geocode, route, plan stops, synthesize logs, evaluate HOS
use crate::application::eld_synthesizer::synthesize;
use crate::application::hos_evaluator::{evaluate_status, evaluate_violations};
use crate::application::mapping_service::{Geocoder, RoutingService};
use crate::application::service_error::{FieldErrors, ServiceResult};
use crate::application::stop_planner::RouteStopPlanner;
use crate::application::trucking_repository::TruckingRepository;
use crate::domain::driver::{EldLogRecord, HosViolationRecord, Trip, TripStatus};
use crate::domain::hos::HosStatusView;
use crate::domain::regulations::round2;
use crate::domain::route::RoutePlan;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

const MAX_LOCATION_LEN: usize = 255;
const MIN_WEIGHT_LBS: i64 = 1000;
const MAX_WEIGHT_LBS: i64 = 80000;

fn default_weight() -> i64 {
    MAX_WEIGHT_LBS
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripPlanRequest {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub current_cycle_hours: f64,
    #[serde(default = "default_weight")]
    pub estimated_weight: i64,
    pub driver_id: Uuid,
}

impl TripPlanRequest {
    fn validate(&self) -> ServiceResult<()> {
        let mut errors = FieldErrors::default();
        errors.check_text("current_location", &self.current_location, MAX_LOCATION_LEN);
        errors.check_text("pickup_location", &self.pickup_location, MAX_LOCATION_LEN);
        errors.check_text("dropoff_location", &self.dropoff_location, MAX_LOCATION_LEN);
        errors.check_cycle_hours(self.current_cycle_hours);
        errors.check(
            (MIN_WEIGHT_LBS..=MAX_WEIGHT_LBS).contains(&self.estimated_weight),
            "estimated_weight: must be between 1000 and 80000",
        );
        errors.into_result()
    }
}

/// A trip recorded directly, without routing.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTrip {
    pub driver_id: Uuid,
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    #[serde(default = "default_weight")]
    pub estimated_weight: i64,
}

impl NewTrip {
    fn validate(&self) -> ServiceResult<()> {
        let mut errors = FieldErrors::default();
        errors.check_text("current_location", &self.current_location, MAX_LOCATION_LEN);
        errors.check_text("pickup_location", &self.pickup_location, MAX_LOCATION_LEN);
        errors.check_text("dropoff_location", &self.dropoff_location, MAX_LOCATION_LEN);
        errors.check(
            (MIN_WEIGHT_LBS..=MAX_WEIGHT_LBS).contains(&self.estimated_weight),
            "estimated_weight: must be between 1000 and 80000",
        );
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub trip: Trip,
    pub route: RoutePlan,
    pub eld_logs: Vec<EldLogRecord>,
    pub hos_status: HosStatusView,
    pub violations: Vec<HosViolationRecord>,
}

#[derive(Clone)]
pub struct TripPlanningService {
    geocoder: Arc<dyn Geocoder>,
    router: Arc<dyn RoutingService>,
    repository: Arc<dyn TruckingRepository>,
    planner: RouteStopPlanner,
    clock: fn() -> DateTime<Utc>,
}

impl TripPlanningService {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        router: Arc<dyn RoutingService>,
        repository: Arc<dyn TruckingRepository>,
    ) -> Self {
        Self {
            geocoder,
            router,
            repository,
            planner: RouteStopPlanner::new(),
            clock: Utc::now,
        }
    }

    /// Use `clock` for the start time of synthesized logs.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Route a trip for a driver and record its ELD logs and HOS violations.
    ///
    /// HOS status and violations are evaluated on the first synthesized day.
    pub async fn plan_trip(&self, request: TripPlanRequest) -> ServiceResult<TripPlan> {
        request.validate()?;
        let driver = self.repository.get_driver(request.driver_id).await?;

        let (current, pickup, dropoff) = futures::try_join!(
            self.geocoder.geocode(&request.current_location),
            self.geocoder.geocode(&request.pickup_location),
            self.geocoder.geocode(&request.dropoff_location),
        )?;
        tracing::debug!(?current, ?pickup, ?dropoff, "Geocoded trip locations");

        let geometry = self.router.route(&[current, pickup, dropoff]).await?;
        let stops = self.planner.plan_stops(
            &request.pickup_location,
            &request.dropoff_location,
            pickup,
            dropoff,
            geometry.distance_miles,
            geometry.duration_minutes,
        );

        let route = RoutePlan {
            coordinates: geometry.coordinates,
            total_distance: round2(geometry.distance_miles),
            estimated_duration: geometry.duration_minutes.round() as u32,
            stops,
        };

        let trip = self
            .repository
            .create_trip(Trip::planned(
                driver.id,
                request.current_location.clone(),
                request.pickup_location.clone(),
                request.dropoff_location.clone(),
                request.estimated_weight as u32,
                route.clone(),
            ))
            .await?;

        let driving_hours = f64::from(route.estimated_duration) / 60.0;
        let daily_logs = synthesize(
            (self.clock)(),
            route.total_distance,
            driving_hours,
            &request.pickup_location,
            &request.dropoff_location,
        );

        let first_day = daily_logs.first().map(|log| log.entries.as_slice()).unwrap_or_default();
        let hos_status = evaluate_status(first_day, request.current_cycle_hours);
        let violations = evaluate_violations(first_day, request.current_cycle_hours);

        let mut eld_logs = Vec::with_capacity(daily_logs.len());
        for log in daily_logs {
            let record = EldLogRecord::new(driver.id, Some(trip.id), log);
            eld_logs.push(self.repository.create_log(record).await?);
        }

        let mut saved_violations = Vec::with_capacity(violations.len());
        for violation in violations {
            let record = HosViolationRecord::new(driver.id, Some(trip.id), violation);
            saved_violations.push(self.repository.create_violation(record).await?);
        }

        tracing::info!(
            trip_id = %trip.id,
            driver_id = %driver.id,
            miles = route.total_distance,
            days = eld_logs.len(),
            violations = saved_violations.len(),
            "Planned trip"
        );

        Ok(TripPlan {
            trip,
            route,
            eld_logs,
            hos_status: hos_status.to_view(),
            violations: saved_violations,
        })
    }

    /// Record a trip for an existing driver without routing it.
    pub async fn create_trip(&self, new_trip: NewTrip) -> ServiceResult<Trip> {
        new_trip.validate()?;
        let driver = self.repository.get_driver(new_trip.driver_id).await?;
        let trip = self
            .repository
            .create_trip(Trip::new(
                driver.id,
                new_trip.current_location,
                new_trip.pickup_location,
                new_trip.dropoff_location,
                new_trip.estimated_weight as u32,
            ))
            .await?;
        tracing::info!(trip_id = %trip.id, driver_id = %driver.id, "Recorded trip");
        Ok(trip)
    }

    pub async fn delete_trip(&self, id: Uuid) -> ServiceResult<()> {
        self.repository.delete_trip(id).await?;
        tracing::info!(trip_id = %id, "Removed trip");
        Ok(())
    }

    pub async fn list_trips(&self) -> ServiceResult<Vec<Trip>> {
        Ok(self.repository.list_trips().await?)
    }

    pub async fn get_trip(&self, id: Uuid) -> ServiceResult<Trip> {
        Ok(self.repository.get_trip(id).await?)
    }

    pub async fn set_status(&self, id: Uuid, status: TripStatus) -> ServiceResult<Trip> {
        Ok(self.repository.update_trip_status(id, status).await?)
    }

    pub async fn trip_logs(&self, id: Uuid) -> ServiceResult<Vec<EldLogRecord>> {
        let trip = self.repository.get_trip(id).await?;
        Ok(self.repository.logs_for_trip(trip.id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mapping_service::fakes::{FixedRouter, TableGeocoder};
    use crate::application::mapping_service::MappingError;
    use crate::application::service_error::ServiceError;
    use crate::application::trucking_repository::{DateRange, RepositoryError};
    use crate::domain::driver::Driver;
    use crate::domain::hos::ViolationKind;
    use crate::domain::route::StopKind;
    use crate::infrastructure::memory_repository::InMemoryRepository;
    use chrono::TimeZone;

    const PLACES: &[(&str, f64, f64)] = &[
        ("Chicago, IL", 41.8781, -87.6298),
        ("Joliet, IL", 41.5250, -88.0817),
        ("Denver, CO", 39.7392, -104.9903),
    ];

    fn six_am() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 6, 0, 0).unwrap()
    }

    async fn setup(router: FixedRouter) -> (TripPlanningService, Arc<InMemoryRepository>, Driver) {
        let repository = Arc::new(InMemoryRepository::new());
        let driver = repository
            .create_driver(Driver::new("Ana Ruiz".to_string(), "IL-4471".to_string(), 40.0))
            .await
            .unwrap();
        let service = TripPlanningService::new(
            Arc::new(TableGeocoder::new(PLACES)),
            Arc::new(router),
            repository.clone(),
        )
        .with_clock(six_am);
        (service, repository, driver)
    }

    fn request(driver_id: Uuid, cycle_hours: f64) -> TripPlanRequest {
        TripPlanRequest {
            current_location: "Chicago, IL".to_string(),
            pickup_location: "Joliet, IL".to_string(),
            dropoff_location: "Denver, CO".to_string(),
            current_cycle_hours: cycle_hours,
            estimated_weight: 42000,
            driver_id,
        }
    }

    #[tokio::test]
    async fn test_plan_multi_day_trip() {
        let (service, repository, driver) = setup(FixedRouter::new(1003.456, 900.4)).await;

        let plan = service.plan_trip(request(driver.id, 20.0)).await.unwrap();

        assert_eq!(plan.route.total_distance, 1003.46);
        assert_eq!(plan.route.estimated_duration, 900);
        let kinds: Vec<StopKind> = plan.route.stops.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![StopKind::Pickup, StopKind::Fuel, StopKind::Rest, StopKind::Dropoff]
        );
        assert_eq!(plan.trip.status, TripStatus::Planned);
        assert_eq!(plan.trip.total_distance, Some(1003.46));

        // 15 driving hours split 11 + 4.
        assert_eq!(plan.eld_logs.len(), 2);
        assert_eq!(plan.eld_logs[0].log.driving_minutes, 660);
        assert_eq!(plan.eld_logs[1].log.driving_minutes, 240);
        assert!(plan.eld_logs.iter().all(|l| l.trip_id == Some(plan.trip.id)));

        // First day: 11 straight driving hours breaks the 8-hour rule.
        assert_eq!(plan.violations.len(), 1);
        assert_eq!(plan.violations[0].violation.kind, ViolationKind::BreakRequired);
        assert_eq!(plan.hos_status.drive_time_left, "0h 00m");
        assert_eq!(plan.hos_status.cycle_used, "33.0h / 70h");

        let stored = repository.logs_for_driver(driver.id, DateRange::default()).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(service.trip_logs(plan.trip.id).await.unwrap().len(), 2);
        assert_eq!(repository.open_violations_for_driver(driver.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_plan_short_trip_has_no_violations() {
        let (service, _, driver) = setup(FixedRouter::new(250.0, 300.0)).await;

        let plan = service.plan_trip(request(driver.id, 10.0)).await.unwrap();

        assert_eq!(plan.eld_logs.len(), 1);
        assert_eq!(plan.eld_logs[0].log.total_miles, 250.0);
        assert!(plan.violations.is_empty());
        assert!(plan.hos_status.is_compliant);
        assert_eq!(plan.hos_status.drive_time_left, "6h 00m");
        assert_eq!(plan.hos_status.on_duty_left, "7h 00m");
    }

    #[tokio::test]
    async fn test_unknown_location_is_reported() {
        let (service, repository, driver) = setup(FixedRouter::new(250.0, 300.0)).await;
        let mut req = request(driver.id, 10.0);
        req.dropoff_location = "Atlantis".to_string();

        let err = service.plan_trip(req).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Mapping(MappingError::LocationNotFound(ref l)) if l == "Atlantis"
        ));
        assert!(repository.list_trips().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_geocoder_outage_is_reported() {
        let repository = Arc::new(InMemoryRepository::new());
        let driver = repository
            .create_driver(Driver::new("Ana Ruiz".to_string(), "IL-9000".to_string(), 0.0))
            .await
            .unwrap();
        let mut geocoder = TableGeocoder::new(PLACES);
        geocoder.unavailable = true;
        let service = TripPlanningService::new(
            Arc::new(geocoder),
            Arc::new(FixedRouter::new(250.0, 300.0)),
            repository,
        );

        let err = service.plan_trip(request(driver.id, 10.0)).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Mapping(MappingError::GeocodingUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_no_route_is_reported() {
        let (service, _, driver) = setup(FixedRouter::unroutable()).await;
        let err = service.plan_trip(request(driver.id, 10.0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Mapping(MappingError::NoRouteFound)));
    }

    #[tokio::test]
    async fn test_unknown_driver_is_not_found() {
        let (service, _, _) = setup(FixedRouter::new(250.0, 300.0)).await;
        let err = service.plan_trip(request(Uuid::new_v4(), 10.0)).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Repository(RepositoryError::NotFound { entity: "driver", .. })
        ));
    }

    #[tokio::test]
    async fn test_request_validation() {
        let (service, _, driver) = setup(FixedRouter::new(250.0, 300.0)).await;
        let mut req = request(driver.id, 71.0);
        req.estimated_weight = 500;
        req.pickup_location = String::new();

        match service.plan_trip(req).await.unwrap_err() {
            ServiceError::InvalidRequest(messages) => {
                assert_eq!(messages.len(), 3);
                assert!(messages[0].starts_with("pickup_location"));
                assert!(messages[1].starts_with("current_cycle_hours"));
                assert!(messages[2].starts_with("estimated_weight"));
            }
            other => panic!("expected invalid request, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cycle_hours_limited_to_two_decimals() {
        let (service, repository, driver) = setup(FixedRouter::new(250.0, 300.0)).await;

        match service.plan_trip(request(driver.id, 10.123)).await.unwrap_err() {
            ServiceError::InvalidRequest(messages) => assert_eq!(
                messages,
                vec!["current_cycle_hours: ensure that there are no more than 2 decimal places"]
            ),
            other => panic!("expected invalid request, got {:?}", other),
        }
        assert!(repository.list_trips().await.unwrap().is_empty());

        assert!(service.plan_trip(request(driver.id, 10.12)).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_trip_without_route() {
        let (service, _, driver) = setup(FixedRouter::unroutable()).await;
        let trip = service
            .create_trip(NewTrip {
                driver_id: driver.id,
                current_location: "Chicago, IL".to_string(),
                pickup_location: "Joliet, IL".to_string(),
                dropoff_location: "Denver, CO".to_string(),
                estimated_weight: 36000,
            })
            .await
            .unwrap();

        assert_eq!(trip.status, TripStatus::Planned);
        assert_eq!(trip.route_data, None);
        assert_eq!(trip.total_distance, None);
        assert_eq!(service.list_trips().await.unwrap(), vec![trip.clone()]);

        service.delete_trip(trip.id).await.unwrap();
        assert!(service.list_trips().await.unwrap().is_empty());
        assert!(matches!(
            service.delete_trip(trip.id).await,
            Err(ServiceError::Repository(RepositoryError::NotFound { entity: "trip", .. }))
        ));
    }

    #[tokio::test]
    async fn test_create_trip_checks_driver_and_fields() {
        let (service, _, _) = setup(FixedRouter::unroutable()).await;
        let mut new_trip = NewTrip {
            driver_id: Uuid::new_v4(),
            current_location: "Chicago, IL".to_string(),
            pickup_location: "Joliet, IL".to_string(),
            dropoff_location: "Denver, CO".to_string(),
            estimated_weight: 36000,
        };
        assert!(matches!(
            service.create_trip(new_trip.clone()).await,
            Err(ServiceError::Repository(RepositoryError::NotFound { entity: "driver", .. }))
        ));

        new_trip.dropoff_location = " ".to_string();
        new_trip.estimated_weight = 90000;
        match service.create_trip(new_trip).await.unwrap_err() {
            ServiceError::InvalidRequest(messages) => assert_eq!(messages.len(), 2),
            other => panic!("expected invalid request, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_set_trip_status() {
        let (service, _, driver) = setup(FixedRouter::new(250.0, 300.0)).await;
        let plan = service.plan_trip(request(driver.id, 0.0)).await.unwrap();

        let trip = service.set_status(plan.trip.id, TripStatus::Active).await.unwrap();
        assert_eq!(trip.status, TripStatus::Active);
        assert_eq!(service.get_trip(plan.trip.id).await.unwrap().status, TripStatus::Active);
    }
}
