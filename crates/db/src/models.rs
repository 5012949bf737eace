use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use tinta_core::models::slot::{SlotStatus, TimeSlot};

/// Raw `time_slots` row. The status is carried as text and validated
/// through the domain enum on the way out, so a corrupt row fails loud
/// instead of leaking an unknown status into the engine.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub duration_hours: i32,
    pub price_ars: i32,
    pub status: String,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_instagram: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbTimeSlot> for TimeSlot {
    type Error = eyre::Report;

    fn try_from(row: DbTimeSlot) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<SlotStatus>()
            .map_err(|err| eyre::eyre!("Corrupt status on slot {}: {err}", row.id))?;
        Ok(TimeSlot {
            id: row.id,
            start_time: row.start_time,
            duration_hours: row.duration_hours,
            price_ars: row.price_ars,
            status,
            client_name: row.client_name,
            client_email: row.client_email,
            client_phone: row.client_phone,
            client_instagram: row.client_instagram,
            created_at: row.created_at,
        })
    }
}
