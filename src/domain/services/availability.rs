use chrono::{NaiveDate, NaiveTime};
use std::collections::HashSet;

/// Computes the open slots for one day: the configured times minus the times
/// already taken by non-cancelled reservations. Configured ordering is
/// preserved; booked times are compared at hour:minute precision since
/// reservation times carry seconds.
pub fn resolve_slots(configured: &[String], booked: &[NaiveTime]) -> Vec<String> {
    let taken: HashSet<String> = booked.iter()
        .map(|t| t.format("%H:%M").to_string())
        .collect();

    let mut seen = HashSet::new();
    configured.iter()
        .filter(|t| parse_slot(t).is_some())
        .filter(|t| !taken.contains(t.as_str()))
        .filter(|t| seen.insert(t.as_str().to_string()))
        .cloned()
        .collect()
}

/// Parses a configured "HH:MM" slot label.
pub fn parse_slot(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// Dates in `days` that still have at least one open slot. `days` pairs each
/// configured date with its time list; `booked` carries every non-cancelled
/// reservation slot in the same range.
pub fn open_dates(days: &[(NaiveDate, Vec<String>)], booked: &[(NaiveDate, NaiveTime)]) -> Vec<NaiveDate> {
    days.iter()
        .filter(|(date, times)| {
            let day_booked: Vec<NaiveTime> = booked.iter()
                .filter(|(d, _)| d == date)
                .map(|(_, t)| *t)
                .collect();
            !resolve_slots(times, &day_booked).is_empty()
        })
        .map(|(date, _)| *date)
        .collect()
}
