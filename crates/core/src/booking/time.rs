//! Studio-local calendar arithmetic.
//!
//! All timestamps are stored and compared in UTC; day and month
//! boundaries are what the studio's wall clock says they are. Argentina
//! has not observed DST since 2009, but the conversions still go
//! through `chrono-tz` rather than a hard-coded offset.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::BookingError;

/// The studio's timezone. Slot times, day bounds and month bounds are
/// all interpreted on this wall clock.
pub const STUDIO_TZ: Tz = chrono_tz::America::Argentina::Buenos_Aires;

/// UTC instant of the studio-local midnight starting `day`.
fn local_midnight(day: NaiveDate) -> DateTime<Utc> {
    let naive = day.and_time(NaiveTime::MIN);
    STUDIO_TZ
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        // Midnight skipped by a DST jump: fall back to the UTC reading.
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// UTC start of the studio-local day containing `now`.
pub fn start_of_today(now: DateTime<Utc>) -> DateTime<Utc> {
    local_midnight(now.with_timezone(&STUDIO_TZ).date_naive())
}

/// UTC bounds `[midnight, next midnight)` of the studio-local day
/// containing `at`.
pub fn day_bounds(at: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let day = at.with_timezone(&STUDIO_TZ).date_naive();
    let next = day.checked_add_days(Days::new(1)).unwrap_or(day);
    (local_midnight(day), local_midnight(next))
}

/// UTC bounds `[first of month, first of next month)` in studio time.
/// Months are 1-based.
pub fn month_bounds(year: i32, month: u32) -> Result<(DateTime<Utc>, DateTime<Utc>), BookingError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| BookingError::Validation(format!("Invalid month: {year}-{month}")))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| BookingError::Validation(format!("Invalid month: {year}-{month}")))?;
    Ok((local_midnight(first), local_midnight(next)))
}

/// UTC instant of a studio-local date and wall-clock time.
pub fn studio_datetime(date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>, BookingError> {
    STUDIO_TZ
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            BookingError::Validation(format!("Nonexistent local time: {date} {time}"))
        })
}

/// Parse the `YYYY-MM-DD` / `HH:MM` pair the creation form submits.
pub fn parse_date_time(date: &str, time: &str) -> Result<DateTime<Utc>, BookingError> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| BookingError::Validation(format!("Invalid date: {date}")))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| BookingError::Validation(format!("Invalid time: {time}")))?;
    studio_datetime(date, time)
}
