// HOS evaluator - remaining legal time and violations for one day's entries
use crate::domain::duty_status::HourlyEntry;
use crate::domain::hos::{HosStatus, Violation, ViolationKind};
use crate::domain::regulations::{
    format_clock, BREAK_TRIGGER_HOURS, BREAK_TRIGGER_MINUTES, CYCLE_LIMIT_HOURS,
    MAX_DRIVING_MINUTES, MAX_ON_DUTY_MINUTES, MINUTES_PER_ENTRY,
};

/// Whole-hour usage totals for a sequence of entries.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DutyTotals {
    driving_minutes: u32,
    on_duty_minutes: u32,
    cycle_used_hours: f64,
}

impl DutyTotals {
    fn tally(entries: &[HourlyEntry], cycle_hours_before: f64) -> Self {
        let driving = entries.iter().filter(|e| e.status.is_driving()).count() as u32;
        let on_duty = entries.iter().filter(|e| e.status.is_on_duty()).count() as u32;
        let on_duty_minutes = on_duty * MINUTES_PER_ENTRY;

        Self {
            driving_minutes: driving * MINUTES_PER_ENTRY,
            on_duty_minutes,
            cycle_used_hours: cycle_hours_before + f64::from(on_duty_minutes) / 60.0,
        }
    }
}

/// Driving streak still running at the end of the sequence.
fn trailing_driving_streak(entries: &[HourlyEntry]) -> u32 {
    entries
        .iter()
        .rev()
        .take_while(|e| e.status.is_driving())
        .count() as u32
}

/// Longest run of consecutive driving entries anywhere in the sequence.
fn longest_driving_streak(entries: &[HourlyEntry]) -> u32 {
    let mut current = 0u32;
    let mut longest = 0u32;
    for entry in entries {
        if entry.status.is_driving() {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Snapshot of remaining drive, duty and break time.
///
/// The break clock follows the streak in progress at the end of `entries`,
/// unlike [`evaluate_violations`] which looks at the longest streak.
pub fn evaluate_status(entries: &[HourlyEntry], cycle_hours_before: f64) -> HosStatus {
    let totals = DutyTotals::tally(entries, cycle_hours_before);
    let continuous_driving = trailing_driving_streak(entries);

    let is_compliant = totals.driving_minutes <= MAX_DRIVING_MINUTES
        && totals.on_duty_minutes <= MAX_ON_DUTY_MINUTES
        && totals.cycle_used_hours <= CYCLE_LIMIT_HOURS
        && continuous_driving <= BREAK_TRIGGER_HOURS;

    HosStatus {
        drive_minutes_left: MAX_DRIVING_MINUTES.saturating_sub(totals.driving_minutes),
        on_duty_minutes_left: MAX_ON_DUTY_MINUTES.saturating_sub(totals.on_duty_minutes),
        cycle_used_hours: totals.cycle_used_hours,
        break_minutes_left: BREAK_TRIGGER_MINUTES
            .saturating_sub(continuous_driving * MINUTES_PER_ENTRY),
        is_compliant,
    }
}

/// Every limit exceeded by `entries`, at most one per check.
pub fn evaluate_violations(entries: &[HourlyEntry], cycle_hours_before: f64) -> Vec<Violation> {
    let totals = DutyTotals::tally(entries, cycle_hours_before);
    let mut violations = Vec::new();

    if totals.driving_minutes > MAX_DRIVING_MINUTES {
        violations.push(Violation::new(
            ViolationKind::DrivingLimit,
            format!(
                "Exceeded 11-hour driving limit by {}",
                format_clock(totals.driving_minutes - MAX_DRIVING_MINUTES)
            ),
        ));
    }

    if totals.on_duty_minutes > MAX_ON_DUTY_MINUTES {
        violations.push(Violation::new(
            ViolationKind::DutyLimit,
            format!(
                "Exceeded 14-hour on-duty limit by {}",
                format_clock(totals.on_duty_minutes - MAX_ON_DUTY_MINUTES)
            ),
        ));
    }

    if totals.cycle_used_hours > CYCLE_LIMIT_HOURS {
        violations.push(Violation::new(
            ViolationKind::DutyLimit,
            format!(
                "Exceeded 70-hour cycle limit by {:.1} hours",
                totals.cycle_used_hours - CYCLE_LIMIT_HOURS
            ),
        ));
    }

    let longest = longest_driving_streak(entries);
    if longest > BREAK_TRIGGER_HOURS {
        violations.push(Violation::new(
            ViolationKind::BreakRequired,
            format!("Drove {} hours without required 30-minute break", longest),
        ));
    }

    violations
}
