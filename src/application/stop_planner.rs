// Route stop planner - pickup, fuel, rest and dropoff stops for a routed trip
use crate::domain::regulations::{
    DROPOFF_MINUTES, FUEL_INTERVAL_MILES, FUEL_STOP_MINUTES, PICKUP_MINUTES,
    REST_INTERVAL_DRIVING_HOURS, REST_STOP_MINUTES,
};
use crate::domain::route::{Coordinates, Stop, StopKind};

/// Where an intermediate stop falls among the stops of its kind.
#[derive(Debug, Clone, Copy)]
pub struct StopPlacement {
    pub kind: StopKind,
    /// 1-based position among stops of the same kind.
    pub ordinal: usize,
    pub count: usize,
    pub pickup: Coordinates,
    pub dropoff: Coordinates,
}

/// Places fuel and rest stops on the map.
pub trait PositionEstimator: Send + Sync {
    fn estimate(&self, placement: &StopPlacement) -> Coordinates;
}

/// Puts every intermediate stop at the pickup coordinate.
///
/// Stops are counted, not interpolated along the route geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickupAnchored;

impl PositionEstimator for PickupAnchored {
    fn estimate(&self, placement: &StopPlacement) -> Coordinates {
        placement.pickup
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteStopPlanner<E = PickupAnchored> {
    estimator: E,
}

impl RouteStopPlanner {
    pub fn new() -> Self {
        Self {
            estimator: PickupAnchored,
        }
    }
}

impl<E: PositionEstimator> RouteStopPlanner<E> {
    pub fn with_estimator(estimator: E) -> Self {
        Self { estimator }
    }

    /// Build the ordered stop list: pickup, every fuel stop, every rest stop, dropoff.
    pub fn plan_stops(
        &self,
        pickup: &str,
        dropoff: &str,
        pickup_coords: Coordinates,
        dropoff_coords: Coordinates,
        total_distance_miles: f64,
        total_duration_minutes: f64,
    ) -> Vec<Stop> {
        let fuel_stops = (total_distance_miles / FUEL_INTERVAL_MILES).floor() as usize;
        let driving_hours = total_duration_minutes / 60.0;
        let rest_stops = (driving_hours / REST_INTERVAL_DRIVING_HOURS).floor() as usize;

        let mut stops = Vec::with_capacity(fuel_stops + rest_stops + 2);
        let mut next_id = 1;
        let mut push = |kind: StopKind, label: String, coordinates: Coordinates| {
            stops.push(make_stop(next_id, kind, label, coordinates));
            next_id += 1;
        };

        push(StopKind::Pickup, pickup.to_string(), pickup_coords);

        for (kind, count, label) in [
            (StopKind::Fuel, fuel_stops, "Fuel Stop"),
            (StopKind::Rest, rest_stops, "Rest Area"),
        ] {
            for ordinal in 1..=count {
                let placement = StopPlacement {
                    kind,
                    ordinal,
                    count,
                    pickup: pickup_coords,
                    dropoff: dropoff_coords,
                };
                let coordinates = self.estimator.estimate(&placement);
                push(kind, format!("{} {}", label, ordinal), coordinates);
            }
        }

        push(StopKind::Dropoff, dropoff.to_string(), dropoff_coords);

        tracing::debug!(
            fuel_stops,
            rest_stops,
            total_distance_miles,
            "Planned route stops"
        );

        stops
    }
}

fn make_stop(id: usize, kind: StopKind, location_label: String, coordinates: Coordinates) -> Stop {
    let (duration_minutes, estimated_time, description) = match kind {
        StopKind::Pickup => (PICKUP_MINUTES, "1 hour", "Load pickup - 1 hour"),
        StopKind::Fuel => (FUEL_STOP_MINUTES, "30 minutes", "Required fuel stop"),
        StopKind::Rest => (REST_STOP_MINUTES, "10 hours", "Required 10-hour rest break"),
        StopKind::Dropoff => (DROPOFF_MINUTES, "1 hour", "Unload delivery - 1 hour"),
    };

    Stop {
        id: format!("{}-{}", kind.as_str(), id),
        kind,
        location_label,
        coordinates,
        estimated_time: estimated_time.to_string(),
        description: description.to_string(),
        duration_minutes,
        required: true,
    }
}
