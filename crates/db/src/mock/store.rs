use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use mockall::mock;
use uuid::Uuid;

use tinta_core::models::slot::{ClientDetails, NewSlot, SlotChanges, SlotStatus, TimeSlot};
use tinta_core::store::SlotStore;

// Mock slot store for testing handlers without a database
mock! {
    pub SlotStore {}

    #[async_trait]
    impl SlotStore for SlotStore {
        async fn insert_slot(&self, slot: &NewSlot) -> Result<TimeSlot>;

        async fn insert_slots(&self, slots: &[NewSlot]) -> Result<u64>;

        async fn fetch_slot(&self, id: Uuid) -> Result<Option<TimeSlot>>;

        async fn claim_if_available(&self, id: Uuid) -> Result<Option<TimeSlot>>;

        async fn list_available_from(&self, from: DateTime<Utc>) -> Result<Vec<TimeSlot>>;

        async fn list_available_between(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<Vec<TimeSlot>>;

        async fn list_all(&self) -> Result<Vec<TimeSlot>>;

        async fn list_between(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> Result<Vec<TimeSlot>>;

        async fn block_slots(&self, ids: &[Uuid]) -> Result<u64>;

        async fn set_status(&self, id: Uuid, status: SlotStatus, clear_client: bool) -> Result<bool>;

        async fn attach_client_details(
            &self,
            id: Uuid,
            details: &ClientDetails,
        ) -> Result<Option<TimeSlot>>;

        async fn update_slot(&self, id: Uuid, changes: &SlotChanges) -> Result<bool>;

        async fn delete_slot(&self, id: Uuid) -> Result<bool>;

        async fn delete_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<u64>;
    }
}
