//! Recurring weekly availability template.
//!
//! The studio sells two session lengths on a fixed weekly rhythm:
//! afternoons on Monday and Wednesday, mornings on Tuesday and
//! Thursday, each day offering two short sessions and one long one.
//! Bulk generation expands the template over a whole month and skips
//! anything already in storage, so re-running a month is idempotent.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use std::collections::HashSet;

use super::time::studio_datetime;
use crate::errors::BookingError;
use crate::models::slot::{NewSlot, TimeSlot};

pub const SHORT_SESSION_HOURS: i32 = 3;
pub const LONG_SESSION_HOURS: i32 = 6;
pub const SHORT_SESSION_PRICE_ARS: i32 = 60_000;
pub const LONG_SESSION_PRICE_ARS: i32 = 110_000;

/// Rows per bulk insert statement, keeping each request's payload
/// bounded.
pub const INSERT_BATCH_SIZE: usize = 20;

struct SessionTemplate {
    hour: u32,
    minute: u32,
    duration_hours: i32,
    price_ars: i32,
}

const AFTERNOON_SESSIONS: [SessionTemplate; 3] = [
    SessionTemplate {
        hour: 15,
        minute: 0,
        duration_hours: SHORT_SESSION_HOURS,
        price_ars: SHORT_SESSION_PRICE_ARS,
    },
    SessionTemplate {
        hour: 18,
        minute: 0,
        duration_hours: SHORT_SESSION_HOURS,
        price_ars: SHORT_SESSION_PRICE_ARS,
    },
    SessionTemplate {
        hour: 15,
        minute: 0,
        duration_hours: LONG_SESSION_HOURS,
        price_ars: LONG_SESSION_PRICE_ARS,
    },
];

const MORNING_SESSIONS: [SessionTemplate; 3] = [
    SessionTemplate {
        hour: 8,
        minute: 30,
        duration_hours: SHORT_SESSION_HOURS,
        price_ars: SHORT_SESSION_PRICE_ARS,
    },
    SessionTemplate {
        hour: 11,
        minute: 30,
        duration_hours: SHORT_SESSION_HOURS,
        price_ars: SHORT_SESSION_PRICE_ARS,
    },
    SessionTemplate {
        hour: 8,
        minute: 30,
        duration_hours: LONG_SESSION_HOURS,
        price_ars: LONG_SESSION_PRICE_ARS,
    },
];

fn sessions_for(weekday: Weekday) -> Option<&'static [SessionTemplate]> {
    match weekday {
        Weekday::Mon | Weekday::Wed => Some(&AFTERNOON_SESSIONS),
        Weekday::Tue | Weekday::Thu => Some(&MORNING_SESSIONS),
        _ => None,
    }
}

/// Expand the weekly template over every day of the given month.
/// Months are 1-based.
pub fn month_candidates(year: i32, month: u32) -> Result<Vec<NewSlot>, BookingError> {
    let mut day = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| BookingError::Validation(format!("Invalid month: {year}-{month}")))?;

    let mut candidates = Vec::new();
    while day.month() == month {
        if let Some(sessions) = sessions_for(day.weekday()) {
            for session in sessions {
                let time = NaiveTime::from_hms_opt(session.hour, session.minute, 0)
                    .ok_or_else(|| {
                        BookingError::Validation(format!(
                            "Invalid template time: {}:{:02}",
                            session.hour, session.minute
                        ))
                    })?;
                candidates.push(NewSlot {
                    start_time: studio_datetime(day, time)?,
                    duration_hours: session.duration_hours,
                    price_ars: session.price_ars,
                });
            }
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    Ok(candidates)
}

/// Drop candidates whose `(start_time, duration_hours)` pair already
/// exists in storage, regardless of the existing slot's status.
pub fn dedup_against_existing(candidates: Vec<NewSlot>, existing: &[TimeSlot]) -> Vec<NewSlot> {
    let taken: HashSet<_> = existing
        .iter()
        .map(|slot| (slot.start_time, slot.duration_hours))
        .collect();
    candidates
        .into_iter()
        .filter(|c| !taken.contains(&(c.start_time, c.duration_hours)))
        .collect()
}
