// ELD log domain models - synthesized daily grids and their export projection
use super::duty_status::HourlyEntry;
use super::regulations::format_duration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn compliant_by_default() -> bool {
    true
}

/// One day of duty-status entries. Manually entered logs may omit the
/// totals, remarks and compliance flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    #[serde(rename = "log_date")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub total_miles: f64,
    #[serde(rename = "driving_time", default)]
    pub driving_minutes: u32,
    #[serde(rename = "on_duty_time", default)]
    pub on_duty_minutes: u32,
    #[serde(rename = "off_duty_time", default)]
    pub off_duty_minutes: u32,
    #[serde(rename = "sleeper_berth_time", default)]
    pub sleeper_minutes: u32,
    #[serde(rename = "time_entries")]
    pub entries: Vec<HourlyEntry>,
    #[serde(default)]
    pub remarks: Vec<String>,
    #[serde(default = "compliant_by_default")]
    pub is_compliant: bool,
}

/// Printable form of a [`DailyLog`] for the PDF renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogExport {
    pub driver_name: String,
    pub date: String,
    pub total_miles: f64,
    pub time_entries: Vec<HourlyEntry>,
    pub driving_time: String,
    pub on_duty_time: String,
    pub off_duty_time: String,
    pub sleeper_berth_time: String,
    pub remarks: Vec<String>,
}

impl LogExport {
    pub fn from_log(log: &DailyLog, driver_name: &str) -> Self {
        Self {
            driver_name: driver_name.to_string(),
            date: log.date.format("%Y-%m-%d").to_string(),
            total_miles: log.total_miles,
            time_entries: log.entries.clone(),
            driving_time: format_duration(log.driving_minutes),
            on_duty_time: format_duration(log.on_duty_minutes),
            off_duty_time: format_duration(log.off_duty_minutes),
            sleeper_berth_time: format_duration(log.sleeper_minutes),
            remarks: log.remarks.clone(),
        }
    }
}
