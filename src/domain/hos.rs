// HOS domain models - status snapshot and violations
use super::regulations::{format_clock, format_cycle_used};
use serde::{Deserialize, Serialize};

/// Remaining legal time computed from one day's entries and the running cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct HosStatus {
    pub drive_minutes_left: u32,
    pub on_duty_minutes_left: u32,
    pub cycle_used_hours: f64,
    pub break_minutes_left: u32,
    pub is_compliant: bool,
}

impl HosStatus {
    pub fn drive_time_left(&self) -> String {
        format_clock(self.drive_minutes_left)
    }

    pub fn on_duty_left(&self) -> String {
        format_clock(self.on_duty_minutes_left)
    }

    pub fn cycle_used(&self) -> String {
        format_cycle_used(self.cycle_used_hours)
    }

    pub fn next_break(&self) -> String {
        format_clock(self.break_minutes_left)
    }

    pub fn to_view(&self) -> HosStatusView {
        HosStatusView {
            drive_time_left: self.drive_time_left(),
            on_duty_left: self.on_duty_left(),
            cycle_used: self.cycle_used(),
            next_break: self.next_break(),
            is_compliant: self.is_compliant,
        }
    }
}

/// Display projection of [`HosStatus`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HosStatusView {
    pub drive_time_left: String,
    pub on_duty_left: String,
    pub cycle_used: String,
    pub next_break: String,
    pub is_compliant: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    DrivingLimit,
    DutyLimit,
    BreakRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Warning,
    Violation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    #[serde(rename = "violation_type")]
    pub kind: ViolationKind,
    pub description: String,
    pub severity: Severity,
}

impl Violation {
    pub fn new(kind: ViolationKind, description: String) -> Self {
        Self {
            kind,
            description,
            severity: Severity::Violation,
        }
    }
}
