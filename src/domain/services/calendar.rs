use crate::domain::models::reservation::Reservation;
use chrono::{Duration, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, Event as IcalEvent, EventLike};

/// Generates an iCalendar (.ics) string for a confirmed consultation.
/// Consultations are rendered as one-hour events in the site timezone.
pub fn generate_ics(reservation: &Reservation, site_name: &str, timezone: &str) -> String {
    let tz: Tz = timezone.parse().unwrap_or(chrono_tz::UTC);

    let start = tz.from_local_datetime(&reservation.date.and_time(reservation.time))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);
    let end = start + Duration::hours(1);

    let mut calendar = Calendar::new();

    let summary = format!("{} consultation", site_name);
    let description = format!("Consultation booked by {}", reservation.name);

    let ical_event = IcalEvent::new()
        .summary(&summary)
        .description(&description)
        .starts(start)
        .ends(end)
        .uid(&reservation.id)
        .done();

    calendar.push(ical_event);
    calendar.to_string()
}
