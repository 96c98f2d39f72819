use chrono::{NaiveDate, NaiveTime, Timelike};
use thiserror::Error;

use crate::models::{BookedInterval, DayRule, WeeklySchedule};

/// Default booking granularity in minutes
pub const DEFAULT_SLOT_SIZE_MINUTES: u32 = 30;

/// Precondition violations in the inputs to the availability computation.
///
/// "Provider closed that day" is NOT an error; a closed or missing day rule
/// yields an empty slot set.
#[derive(Debug, Error)]
pub enum AvailabilityError {
    #[error("slot size must be greater than zero")]
    InvalidSlotSize,

    #[error("schedule has more than one rule for weekday {0}")]
    DuplicateDayRule(u8),

    #[error("available day rule for weekday {day} has start {start} after end {end}")]
    InvalidWindow {
        day: u8,
        start: NaiveTime,
        end: NaiveTime,
    },
}

/// Compute the free slots for a provider on a given day.
///
/// Candidate slots are generated at a fixed `slot_size_minutes` stride
/// across the day rule's `[start, end)` window (a trailing partial slot is
/// dropped), then any candidate overlapping a booked interval is discarded.
/// Labels come back as `HH:MM`, ascending.
///
/// Schedule times and booking instants are both interpreted in UTC; a
/// deployment that wants provider-local wall clocks converts at the edge.
pub fn compute_available_slots(
    schedule: &WeeklySchedule,
    booked: &[BookedInterval],
    date: NaiveDate,
    slot_size_minutes: u32,
) -> Result<Vec<String>, AvailabilityError> {
    let rule = match day_rule_for(schedule, date)? {
        Some(rule) => rule,
        None => return Ok(Vec::new()),
    };

    if !rule.is_available {
        return Ok(Vec::new());
    }

    let candidates = generate_slot_times(rule, slot_size_minutes)?;

    let slots = candidates
        .into_iter()
        .filter(|slot_start| {
            let start = date.and_time(*slot_start).and_utc();
            let end = start + chrono::Duration::minutes(slot_size_minutes as i64);
            !booked.iter().any(|b| overlaps(start, end, b))
        })
        .map(|t| format!("{:02}:{:02}", t.hour(), t.minute()))
        .collect();

    Ok(slots)
}

/// Find the single day rule covering `date`, if any
fn day_rule_for(
    schedule: &WeeklySchedule,
    date: NaiveDate,
) -> Result<Option<&DayRule>, AvailabilityError> {
    let weekday = WeeklySchedule::weekday_index(date);
    let mut matching = schedule.rules.iter().filter(|r| r.day_of_week == weekday);

    let rule = matching.next();
    if matching.next().is_some() {
        return Err(AvailabilityError::DuplicateDayRule(weekday));
    }

    Ok(rule)
}

/// Generate candidate slot start times across the rule's working window.
///
/// Works in minutes-from-midnight so the final partial slot is dropped
/// cleanly when the window is not a multiple of the stride.
pub fn generate_slot_times(
    rule: &DayRule,
    slot_size_minutes: u32,
) -> Result<Vec<NaiveTime>, AvailabilityError> {
    if slot_size_minutes == 0 {
        return Err(AvailabilityError::InvalidSlotSize);
    }

    let start_min = rule.start_time.hour() * 60 + rule.start_time.minute();
    let end_min = rule.end_time.hour() * 60 + rule.end_time.minute();

    if start_min > end_min {
        return Err(AvailabilityError::InvalidWindow {
            day: rule.day_of_week,
            start: rule.start_time,
            end: rule.end_time,
        });
    }

    let mut slots = Vec::new();
    let mut t = start_min;
    while t + slot_size_minutes <= end_min {
        // Minutes stay below 24h here, so the conversion cannot fail
        if let Some(time) = NaiveTime::from_hms_opt(t / 60, t % 60, 0) {
            slots.push(time);
        }
        t += slot_size_minutes;
    }

    Ok(slots)
}

/// Half-open interval overlap: `[slot_start, slot_end)` vs the booking
#[inline]
pub fn overlaps(
    slot_start: chrono::DateTime<chrono::Utc>,
    slot_end: chrono::DateTime<chrono::Utc>,
    booked: &BookedInterval,
) -> bool {
    slot_start < booked.end() && booked.start < slot_end
}
