use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::BookingError;

/// Lifecycle status of a bookable slot.
///
/// Client-initiated transitions are gated by the booking engine;
/// administrators may force any status. `Blocked` is a dead end that
/// only an administrator can recover a slot from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    PendingPayment,
    Pending,
    Confirmed,
    Completed,
    Blocked,
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Available => "available",
            SlotStatus::PendingPayment => "pending_payment",
            SlotStatus::Pending => "pending",
            SlotStatus::Confirmed => "confirmed",
            SlotStatus::Completed => "completed",
            SlotStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single place a status string is validated. Every boundary that
/// accepts a status (HTTP payloads, database rows) goes through here.
impl FromStr for SlotStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(SlotStatus::Available),
            "pending_payment" => Ok(SlotStatus::PendingPayment),
            "pending" => Ok(SlotStatus::Pending),
            "confirmed" => Ok(SlotStatus::Confirmed),
            "completed" => Ok(SlotStatus::Completed),
            "blocked" => Ok(SlotStatus::Blocked),
            other => Err(BookingError::Validation(format!(
                "Unknown slot status: {other}"
            ))),
        }
    }
}

/// A bookable appointment window.
///
/// `end_time` is always derived from `start_time + duration_hours`,
/// never stored. Client fields are populated when a prospective client
/// submits their details and cleared when the slot is liberated back to
/// `available`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub duration_hours: i32,
    pub price_ars: i32,
    pub status: SlotStatus,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_instagram: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TimeSlot {
    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + Duration::hours(self.duration_hours as i64)
    }

    /// Half-open interval overlap: `[start, end)` intervals touch at a
    /// boundary without conflicting.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start_time < other.end_time() && other.start_time < self.end_time()
    }
}

/// Fields required to insert a slot. Always inserted as `available`
/// with empty client fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSlot {
    pub start_time: DateTime<Utc>,
    pub duration_hours: i32,
    pub price_ars: i32,
}

/// Contact details a client submits to hold a claimed slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub instagram: Option<String>,
}

impl ClientDetails {
    /// Trim and validate. Name, email and phone are required; the email
    /// check is intentionally shallow since confirmation happens over
    /// direct contact anyway.
    pub fn validated(self) -> Result<Self, BookingError> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();
        let phone = self.phone.trim().to_string();
        let instagram = self
            .instagram
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty());

        if name.is_empty() {
            return Err(BookingError::Validation("Name is required".to_string()));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(BookingError::Validation(
                "A valid email is required".to_string(),
            ));
        }
        if phone.is_empty() {
            return Err(BookingError::Validation("Phone is required".to_string()));
        }

        Ok(Self {
            name,
            email,
            phone,
            instagram,
        })
    }
}

/// Partial update an administrator can apply to a slot. `None` fields
/// are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotChanges {
    pub start_time: Option<DateTime<Utc>>,
    pub duration_hours: Option<i32>,
    pub price_ars: Option<i32>,
}

impl SlotChanges {
    pub fn is_empty(&self) -> bool {
        self.start_time.is_none() && self.duration_hours.is_none() && self.price_ars.is_none()
    }
}

/// Creation form payload: a studio-local date and wall-clock time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    /// `YYYY-MM-DD` in studio-local time
    pub date: String,
    /// `HH:MM` in studio-local time
    pub time: String,
    pub duration_hours: i32,
    pub price_ars: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotResponse {
    pub slot_id: Uuid,
}

/// A calendar month (1-based) used by bulk generation and month-range
/// deletion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonthQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkGenerateResponse {
    pub inserted: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteMonthResponse {
    pub deleted: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}
