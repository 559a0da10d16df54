// ELD log synthesizer - splits a planned trip into daily hour-by-hour logs
use crate::domain::duty_status::{DutyStatus, HourlyEntry};
use crate::domain::eld_log::DailyLog;
use crate::domain::regulations::{
    round2, HOURS_PER_DAY, MANDATORY_REST_HOURS, MAX_DAILY_DRIVING_HOURS, MAX_ON_DUTY_MINUTES,
    MINUTES_PER_DAY, PICKUP_MINUTES, DROPOFF_MINUTES,
};
use chrono::{DateTime, Duration, Timelike, Utc};

/// Whole-trip totals, captured once so every day is apportioned against the
/// original distance and hours rather than what remains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripTotals {
    pub distance_miles: f64,
    pub driving_hours: f64,
}

impl TripTotals {
    fn miles_for(self, day_driving_hours: f64) -> f64 {
        day_driving_hours / self.driving_hours * self.distance_miles
    }
}

/// Which remarks a day carries.
#[derive(Debug, Clone, Copy)]
struct DayRole<'a> {
    first: bool,
    last: bool,
    pickup_label: &'a str,
    dropoff_label: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    BeforeShift,
    Pickup,
    Driving,
    Dropoff,
    AfterShift,
}

/// Build the daily logs for a trip starting at `start_time`.
///
/// Trips of 11 driving hours or less fit in one log. Longer trips are cut into
/// days of at most 11 driving hours; each following day starts on the next
/// calendar date, 10 hours later in the clock. `total_driving_hours` must be
/// positive for a trip longer than one day.
pub fn synthesize(
    start_time: DateTime<Utc>,
    total_distance_miles: f64,
    total_driving_hours: f64,
    pickup_label: &str,
    dropoff_label: &str,
) -> Vec<DailyLog> {
    if total_driving_hours <= MAX_DAILY_DRIVING_HOURS {
        let role = DayRole {
            first: true,
            last: true,
            pickup_label,
            dropoff_label,
        };
        return vec![build_day(
            start_time,
            total_distance_miles,
            total_driving_hours,
            role,
        )];
    }

    let totals = TripTotals {
        distance_miles: total_distance_miles,
        driving_hours: total_driving_hours,
    };

    let mut logs = Vec::new();
    let mut current = start_time;
    let mut remaining_hours = total_driving_hours;

    while remaining_hours > 0.0 {
        let day_hours = remaining_hours.min(MAX_DAILY_DRIVING_HOURS);
        let day_miles = round2(totals.miles_for(day_hours));
        remaining_hours -= day_hours;

        let role = DayRole {
            first: logs.is_empty(),
            last: remaining_hours <= 0.0,
            pickup_label,
            dropoff_label,
        };
        logs.push(build_day(current, day_miles, day_hours, role));

        current += Duration::days(1);
        if remaining_hours > 0.0 {
            let next_hour = (current.hour() + MANDATORY_REST_HOURS) % HOURS_PER_DAY;
            current = current.with_hour(next_hour).unwrap_or(current);
        }
    }

    tracing::debug!(
        days = logs.len(),
        total_driving_hours,
        total_distance_miles,
        "Synthesized multi-day ELD logs"
    );

    logs
}

/// One day's grid anchored at `start.hour()`: off-duty, one on-duty pickup
/// hour, `driving_hours` of driving, one on-duty dropoff hour, off-duty.
fn build_day(start: DateTime<Utc>, miles: f64, driving_hours: f64, role: DayRole<'_>) -> DailyLog {
    let shift_start = f64::from(start.hour());
    let driving_end = shift_start + 1.0 + driving_hours;

    let mut entries = Vec::with_capacity(HOURS_PER_DAY as usize);
    let mut remarks = Vec::new();
    let mut previous = None;

    for hour in 0..HOURS_PER_DAY {
        let at = f64::from(hour);
        let (segment, status) = if at < shift_start {
            (Segment::BeforeShift, DutyStatus::OffDuty)
        } else if at < shift_start + 1.0 {
            (Segment::Pickup, DutyStatus::OnDuty)
        } else if at < driving_end {
            (Segment::Driving, DutyStatus::Driving)
        } else if at < driving_end + 1.0 {
            (Segment::Dropoff, DutyStatus::OnDuty)
        } else {
            (Segment::AfterShift, DutyStatus::OffDuty)
        };

        if previous != Some(segment) {
            if let Some(remark) = remark_for(segment, role) {
                remarks.push(format!("{:02}:00 - {}", hour, remark));
            }
            previous = Some(segment);
        }

        entries.push(HourlyEntry::new(hour as u8, status));
    }

    let driving_minutes = (driving_hours * 60.0).round() as u32;
    let on_duty_minutes = driving_minutes + PICKUP_MINUTES + DROPOFF_MINUTES;

    DailyLog {
        date: start,
        total_miles: miles,
        driving_minutes,
        on_duty_minutes,
        off_duty_minutes: MINUTES_PER_DAY.saturating_sub(on_duty_minutes),
        sleeper_minutes: 0,
        entries,
        remarks,
        is_compliant: driving_hours <= MAX_DAILY_DRIVING_HOURS
            && on_duty_minutes <= MAX_ON_DUTY_MINUTES,
    }
}

fn remark_for(segment: Segment, role: DayRole<'_>) -> Option<String> {
    match segment {
        Segment::BeforeShift => None,
        Segment::Pickup if role.first => {
            Some(format!("Begin pickup activities ({})", role.pickup_label))
        }
        Segment::Pickup => None,
        Segment::Driving => Some("Begin driving".to_string()),
        Segment::Dropoff if role.last => {
            Some(format!("Begin dropoff activities ({})", role.dropoff_label))
        }
        Segment::Dropoff => Some("Begin dropoff activities".to_string()),
        Segment::AfterShift => Some("Off duty".to_string()),
    }
}
