use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use uuid::Uuid;

use crate::models::slot::{ClientDetails, NewSlot, SlotChanges, SlotStatus, TimeSlot};

/// Persistence seam for the booking engine.
///
/// Each method is a single round-trip against the backing store; the
/// engine composes them and owns the lifecycle rules. The db crate
/// implements this over Postgres; tests use an in-memory fixture or a
/// mock. Handles are injected per operation, never read from ambient
/// global state.
#[async_trait]
pub trait SlotStore: Send + Sync {
    async fn insert_slot(&self, slot: &NewSlot) -> Result<TimeSlot>;

    /// Insert a batch of slots, returning the number of rows written.
    async fn insert_slots(&self, slots: &[NewSlot]) -> Result<u64>;

    async fn fetch_slot(&self, id: Uuid) -> Result<Option<TimeSlot>>;

    /// Atomically transition `available -> pending_payment` and return
    /// the updated row. `None` means the slot is missing or in any
    /// other status; the caller disambiguates.
    async fn claim_if_available(&self, id: Uuid) -> Result<Option<TimeSlot>>;

    /// Available slots with `start_time >= from`, ascending.
    async fn list_available_from(&self, from: DateTime<Utc>) -> Result<Vec<TimeSlot>>;

    /// Available slots with `start_time` in `[start, end)`, ascending.
    async fn list_available_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>>;

    /// Every slot regardless of status, ascending by `start_time`.
    async fn list_all(&self) -> Result<Vec<TimeSlot>>;

    /// Every slot (any status) with `start_time` in `[start, end)`.
    async fn list_between(&self, start: DateTime<Utc>, end: DateTime<Utc>)
        -> Result<Vec<TimeSlot>>;

    /// Mark the given slots `blocked`. Returns rows affected.
    async fn block_slots(&self, ids: &[Uuid]) -> Result<u64>;

    /// Set a slot's status; when `clear_client` is set the four client
    /// fields are nulled in the same statement. Returns `false` when no
    /// row matched.
    async fn set_status(&self, id: Uuid, status: SlotStatus, clear_client: bool) -> Result<bool>;

    /// Atomically attach client details and advance to `pending`, gated
    /// on the current status being `available` or `pending_payment`.
    /// `None` when the slot is missing or in any other status.
    async fn attach_client_details(
        &self,
        id: Uuid,
        details: &ClientDetails,
    ) -> Result<Option<TimeSlot>>;

    /// Apply a partial update. Returns `false` when no row matched.
    async fn update_slot(&self, id: Uuid, changes: &SlotChanges) -> Result<bool>;

    /// Returns `false` when no row matched.
    async fn delete_slot(&self, id: Uuid) -> Result<bool>;

    /// Delete every slot with `start_time` in `[start, end)`. Returns
    /// rows removed.
    async fn delete_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<u64>;
}
