// Duty status domain model - one hourly bucket of an ELD grid
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DutyStatus {
    OffDuty,
    OnDuty,
    Driving,
    SleeperBerth,
}

impl DutyStatus {
    /// Driving and on-duty (not driving) both count against the 14-hour window.
    pub fn is_on_duty(self) -> bool {
        matches!(self, DutyStatus::Driving | DutyStatus::OnDuty)
    }

    pub fn is_driving(self) -> bool {
        self == DutyStatus::Driving
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyEntry {
    pub hour: u8,
    pub status: DutyStatus,
}

impl HourlyEntry {
    pub fn new(hour: u8, status: DutyStatus) -> Self {
        Self { hour, status }
    }
}
