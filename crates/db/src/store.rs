use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use uuid::Uuid;

use tinta_core::models::slot::{ClientDetails, NewSlot, SlotChanges, SlotStatus, TimeSlot};
use tinta_core::store::SlotStore;

use crate::repositories::time_slot;
use crate::DbPool;

/// `SlotStore` backed by the Postgres pool.
///
/// The booking engine receives this through shared state; tests swap in
/// the mock from [`crate::mock`] instead.
#[derive(Clone)]
pub struct PgSlotStore {
    pool: DbPool,
}

impl PgSlotStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_domain(rows: Vec<crate::models::DbTimeSlot>) -> Result<Vec<TimeSlot>> {
    rows.into_iter().map(TimeSlot::try_from).collect()
}

#[async_trait]
impl SlotStore for PgSlotStore {
    async fn insert_slot(&self, slot: &NewSlot) -> Result<TimeSlot> {
        time_slot::insert_slot(&self.pool, slot).await?.try_into()
    }

    async fn insert_slots(&self, slots: &[NewSlot]) -> Result<u64> {
        time_slot::insert_slots(&self.pool, slots).await
    }

    async fn fetch_slot(&self, id: Uuid) -> Result<Option<TimeSlot>> {
        time_slot::get_slot_by_id(&self.pool, id)
            .await?
            .map(TimeSlot::try_from)
            .transpose()
    }

    async fn claim_if_available(&self, id: Uuid) -> Result<Option<TimeSlot>> {
        time_slot::claim_if_available(&self.pool, id)
            .await?
            .map(TimeSlot::try_from)
            .transpose()
    }

    async fn list_available_from(&self, from: DateTime<Utc>) -> Result<Vec<TimeSlot>> {
        into_domain(time_slot::list_available_from(&self.pool, from).await?)
    }

    async fn list_available_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>> {
        into_domain(time_slot::list_available_between(&self.pool, start, end).await?)
    }

    async fn list_all(&self) -> Result<Vec<TimeSlot>> {
        into_domain(time_slot::list_all(&self.pool).await?)
    }

    async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>> {
        into_domain(time_slot::list_between(&self.pool, start, end).await?)
    }

    async fn block_slots(&self, ids: &[Uuid]) -> Result<u64> {
        time_slot::block_slots(&self.pool, ids).await
    }

    async fn set_status(&self, id: Uuid, status: SlotStatus, clear_client: bool) -> Result<bool> {
        time_slot::set_status(&self.pool, id, status, clear_client).await
    }

    async fn attach_client_details(
        &self,
        id: Uuid,
        details: &ClientDetails,
    ) -> Result<Option<TimeSlot>> {
        time_slot::attach_client_details(&self.pool, id, details)
            .await?
            .map(TimeSlot::try_from)
            .transpose()
    }

    async fn update_slot(&self, id: Uuid, changes: &SlotChanges) -> Result<bool> {
        time_slot::update_slot(&self.pool, id, changes).await
    }

    async fn delete_slot(&self, id: Uuid) -> Result<bool> {
        time_slot::delete_slot(&self.pool, id).await
    }

    async fn delete_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<u64> {
        time_slot::delete_between(&self.pool, start, end).await
    }
}
