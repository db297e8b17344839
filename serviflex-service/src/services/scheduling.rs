//! Checks a requested appointment against a professional's weekly windows.
//!
//! Working hours are wall-clock `HH:MM` strings in the schedule offset, so the
//! requested instant is converted into that offset before comparing.

use crate::models::{Weekday, WorkingHours};
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveTime, Timelike, Utc};
use service_core::error::AppError;

/// Parses a strict `HH:MM` time of day.
pub fn parse_clock(raw: &str) -> Result<NaiveTime, AppError> {
    let trimmed = raw.trim();
    if trimmed.len() != 5 {
        return Err(AppError::bad_request(format!(
            "Invalid time '{}': expected HH:MM",
            raw
        )));
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map_err(|_| AppError::bad_request(format!("Invalid time '{}': expected HH:MM", raw)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn parse(start: &str, end: &str) -> Result<Self, AppError> {
        let window = Self {
            start: parse_clock(start)?,
            end: parse_clock(end)?,
        };
        if window.start >= window.end {
            return Err(AppError::bad_request(format!(
                "Start time {} must be before end time {}",
                start, end
            )));
        }
        Ok(window)
    }

    /// Both bounds inclusive.
    pub fn contains(&self, slot: &RequestedSlot) -> bool {
        self.start <= slot.start && slot.end <= self.end
    }
}

/// The wall-clock span an appointment would occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedSlot {
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Converts an instant into the local slot it would occupy. Seconds are
/// dropped; a slot running past midnight is rejected.
pub fn requested_slot(
    date_time: DateTime<Utc>,
    offset: FixedOffset,
    duration_minutes: u32,
) -> Result<RequestedSlot, AppError> {
    let local = date_time.with_timezone(&offset);
    let start = NaiveTime::from_hms_opt(local.hour(), local.minute(), 0).ok_or_else(|| {
        AppError::InternalError(anyhow::anyhow!("Invalid local time for {}", date_time))
    })?;

    let (end, wrapped) = start.overflowing_add_signed(Duration::minutes(i64::from(duration_minutes)));
    if wrapped != 0 {
        return Err(AppError::bad_request(
            "Appointment must start and end on the same day",
        ));
    }

    Ok(RequestedSlot {
        weekday: Weekday::from(local.weekday()),
        start,
        end,
    })
}

/// True when an available window on the slot's weekday covers the slot.
/// Stored windows that no longer parse are skipped.
pub fn fits_working_hours(slot: &RequestedSlot, hours: &[WorkingHours]) -> bool {
    hours
        .iter()
        .filter(|h| h.available && h.weekday == slot.weekday)
        .filter_map(|h| match TimeWindow::parse(&h.start_time, &h.end_time) {
            Ok(window) => Some(window),
            Err(e) => {
                tracing::warn!(working_hours_id = %h.id, error = %e, "Skipping malformed working hours");
                None
            }
        })
        .any(|window| window.contains(slot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn hours(weekday: Weekday, start: &str, end: &str, available: bool) -> WorkingHours {
        let mut h = WorkingHours::new("prof".into(), weekday, start.into(), end.into());
        h.available = available;
        h
    }

    fn clock(raw: &str) -> NaiveTime {
        parse_clock(raw).unwrap()
    }

    #[test]
    fn clock_requires_hh_mm() {
        assert_eq!(clock("09:30"), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert!(parse_clock("9:30").is_err());
        assert!(parse_clock("24:00").is_err());
        assert!(parse_clock("09:30:00").is_err());
        assert!(parse_clock("nine").is_err());
    }

    #[test]
    fn window_must_be_ordered() {
        assert!(TimeWindow::parse("09:00", "18:00").is_ok());
        assert!(TimeWindow::parse("18:00", "09:00").is_err());
        assert!(TimeWindow::parse("09:00", "09:00").is_err());
    }

    #[test]
    fn slot_drops_seconds_and_adds_duration() {
        // 2024-01-01 is a Monday.
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 10, 15, 42).unwrap();
        let slot = requested_slot(at, utc(), 45).unwrap();
        assert_eq!(slot.weekday, Weekday::Monday);
        assert_eq!(slot.start, clock("10:15"));
        assert_eq!(slot.end, clock("11:00"));
    }

    #[test]
    fn slot_uses_schedule_offset() {
        // 01:30 UTC Monday is 22:30 Sunday at -03:00.
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 1, 30, 0).unwrap();
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let slot = requested_slot(at, offset, 30).unwrap();
        assert_eq!(slot.weekday, Weekday::Sunday);
        assert_eq!(slot.start, clock("22:30"));
        assert_eq!(slot.end, clock("23:00"));
    }

    #[test]
    fn slot_crossing_midnight_is_rejected() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        assert!(requested_slot(at, utc(), 60).is_err());
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let windows = vec![hours(Weekday::Monday, "09:00", "12:00", true)];
        let exact = RequestedSlot {
            weekday: Weekday::Monday,
            start: clock("09:00"),
            end: clock("12:00"),
        };
        assert!(fits_working_hours(&exact, &windows));

        let late = RequestedSlot {
            end: clock("12:01"),
            ..exact
        };
        assert!(!fits_working_hours(&late, &windows));
    }

    #[test]
    fn any_matching_window_is_enough() {
        let windows = vec![
            hours(Weekday::Monday, "08:00", "10:00", true),
            hours(Weekday::Monday, "14:00", "18:00", true),
        ];
        let afternoon = RequestedSlot {
            weekday: Weekday::Monday,
            start: clock("15:00"),
            end: clock("16:00"),
        };
        assert!(fits_working_hours(&afternoon, &windows));
    }

    #[test]
    fn unavailable_or_other_day_windows_do_not_count() {
        let windows = vec![
            hours(Weekday::Monday, "09:00", "18:00", false),
            hours(Weekday::Tuesday, "09:00", "18:00", true),
            hours(Weekday::Monday, "bogus", "18:00", true),
        ];
        let slot = RequestedSlot {
            weekday: Weekday::Monday,
            start: clock("10:00"),
            end: clock("11:00"),
        };
        assert!(!fits_working_hours(&slot, &windows));
    }
}
