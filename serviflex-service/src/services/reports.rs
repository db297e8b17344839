//! Aggregations behind the report endpoints.

use crate::models::{Appointment, Procedure, Rating};
use chrono::{DateTime, Datelike, FixedOffset, Utc};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueSummary {
    pub appointment_count: usize,
    pub total_revenue: f64,
}

/// Prices each appointment by the procedure its professional offers under
/// that name. Appointments for unknown procedures count but add nothing.
pub fn revenue(appointments: &[Appointment], procedures: &[Procedure]) -> RevenueSummary {
    let prices: HashMap<(&str, &str), f64> = procedures
        .iter()
        .map(|p| ((p.professional_id.as_str(), p.name.as_str()), p.price))
        .collect();

    let total_revenue = appointments
        .iter()
        .filter_map(|a| {
            prices
                .get(&(a.professional_id.as_str(), a.procedure.as_str()))
                .copied()
        })
        .sum();

    RevenueSummary {
        appointment_count: appointments.len(),
        total_revenue,
    }
}

#[derive(Debug, Clone)]
pub struct RatingSummary {
    pub count: usize,
    pub average: f64,
    pub ratings: Vec<Rating>,
}

pub fn rating_summary(ratings: Vec<Rating>) -> RatingSummary {
    let count = ratings.len();
    let average = if count == 0 {
        0.0
    } else {
        ratings.iter().map(|r| f64::from(r.score)).sum::<f64>() / count as f64
    };
    RatingSummary {
        count,
        average,
        ratings,
    }
}

fn month_key(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

/// `(year, month)` pairs for the twelve months ending with the one holding
/// `now`, oldest first.
fn last_twelve_months(now: DateTime<FixedOffset>) -> Vec<(i32, u32)> {
    let current = now.year() * 12 + now.month0() as i32;
    (0..12)
        .rev()
        .map(|back| {
            let index = current - back;
            (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
        })
        .collect()
}

/// Counts appointments per `YYYY-MM` over the last twelve months, every
/// month present. Months are taken in the schedule offset.
pub fn appointments_per_month(
    appointments: &[Appointment],
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> BTreeMap<String, u32> {
    let mut counts: BTreeMap<String, u32> = last_twelve_months(now.with_timezone(&offset))
        .into_iter()
        .map(|(year, month)| (month_key(year, month), 0))
        .collect();

    for appointment in appointments {
        let local = appointment.date_time.with_timezone(&offset);
        if let Some(count) = counts.get_mut(&month_key(local.year(), local.month())) {
            *count += 1;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn appointment(professional: &str, procedure: &str, at: DateTime<Utc>) -> Appointment {
        Appointment::new(
            "client".into(),
            professional.into(),
            "est".into(),
            procedure.into(),
            at,
        )
    }

    fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn revenue_prices_by_professional_and_name() {
        let procedures = vec![
            Procedure::new("ana".into(), "Cut".into(), String::new(), 50.0, 30),
            Procedure::new("bia".into(), "Cut".into(), String::new(), 80.0, 30),
        ];
        let appointments = vec![
            appointment("ana", "Cut", day(2024, 1, 1)),
            appointment("bia", "Cut", day(2024, 1, 2)),
            appointment("ana", "Unknown", day(2024, 1, 3)),
        ];

        let summary = revenue(&appointments, &procedures);
        assert_eq!(summary.appointment_count, 3);
        assert_eq!(summary.total_revenue, 130.0);
    }

    #[test]
    fn empty_revenue_is_zero() {
        assert_eq!(
            revenue(&[], &[]),
            RevenueSummary {
                appointment_count: 0,
                total_revenue: 0.0
            }
        );
    }

    #[test]
    fn rating_average() {
        let ratings = vec![
            Rating::new("p".into(), "c".into(), None, 5, String::new()),
            Rating::new("p".into(), "c".into(), None, 2, String::new()),
        ];
        let summary = rating_summary(ratings);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.average, 3.5);

        let empty = rating_summary(Vec::new());
        assert_eq!(empty.count, 0);
        assert_eq!(empty.average, 0.0);
    }

    #[test]
    fn twelve_months_cross_year_boundary() {
        let counts = appointments_per_month(&[], day(2024, 3, 15), utc());
        let keys: Vec<&str> = counts.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 12);
        assert_eq!(keys.first(), Some(&"2023-04"));
        assert_eq!(keys.last(), Some(&"2024-03"));
        assert!(counts.values().all(|&c| c == 0));
    }

    #[test]
    fn appointments_outside_window_are_ignored() {
        let appointments = vec![
            appointment("p", "Cut", day(2024, 3, 1)),
            appointment("p", "Cut", day(2024, 3, 20)),
            appointment("p", "Cut", day(2023, 4, 2)),
            appointment("p", "Cut", day(2023, 3, 31)),
            appointment("p", "Cut", day(2024, 4, 1)),
        ];
        let counts = appointments_per_month(&appointments, day(2024, 3, 15), utc());
        assert_eq!(counts["2024-03"], 2);
        assert_eq!(counts["2023-04"], 1);
        assert_eq!(counts.values().sum::<u32>(), 3);
    }

    #[test]
    fn months_follow_schedule_offset() {
        // 02:00 UTC on 1 March is still February at -03:00.
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 2, 0, 0).unwrap();
        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        let counts = appointments_per_month(&[appointment("p", "Cut", at)], day(2024, 3, 15), offset);
        assert_eq!(counts["2024-02"], 1);
        assert_eq!(counts["2024-03"], 0);
    }
}
