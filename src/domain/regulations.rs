// FMCSA property-carrying limits and time formatting shared by the calculators

/// Maximum driving time in a duty day (11 hours).
pub const MAX_DRIVING_MINUTES: u32 = 11 * 60;

/// Maximum on-duty window in a duty day (14 hours).
pub const MAX_ON_DUTY_MINUTES: u32 = 14 * 60;

/// Rolling 70-hour / 8-day cycle limit.
pub const CYCLE_LIMIT_HOURS: f64 = 70.0;

/// Consecutive driving hours after which a 30-minute break is required.
pub const BREAK_TRIGGER_HOURS: u32 = 8;

pub const BREAK_TRIGGER_MINUTES: u32 = BREAK_TRIGGER_HOURS * 60;

/// Driving hours synthesized into one daily log before a rest day starts.
pub const MAX_DAILY_DRIVING_HOURS: f64 = 11.0;

/// Off-duty reset between driving days.
pub const MANDATORY_REST_HOURS: u32 = 10;

pub const FUEL_INTERVAL_MILES: f64 = 1000.0;

/// Driving hours between required rest stops on a route.
pub const REST_INTERVAL_DRIVING_HOURS: f64 = 11.0;

pub const PICKUP_MINUTES: u32 = 60;
pub const DROPOFF_MINUTES: u32 = 60;
pub const FUEL_STOP_MINUTES: u32 = 30;
pub const REST_STOP_MINUTES: u32 = MANDATORY_REST_HOURS * 60;

pub const HOURS_PER_DAY: u32 = 24;
pub const MINUTES_PER_DAY: u32 = HOURS_PER_DAY * 60;
pub const MINUTES_PER_ENTRY: u32 = 60;

/// Format minutes as `"{h}h {mm}m"`, the HOS clock display.
pub fn format_clock(minutes: u32) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

/// Format minutes as `"{h}h {m}m"`, the log export display.
pub fn format_duration(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Format cycle usage as `"{used:.1}h / 70h"`.
pub fn format_cycle_used(cycle_used_hours: f64) -> String {
    format!("{:.1}h / {}h", cycle_used_hours, CYCLE_LIMIT_HOURS)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
