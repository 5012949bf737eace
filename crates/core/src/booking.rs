//! # Slot Booking Engine
//!
//! Implements the slot lifecycle on top of an injected [`SlotStore`]:
//!
//! - client operations: claim a slot, submit contact details;
//! - administrator operations: create, bulk-generate, update, relabel,
//!   delete;
//! - queries: public availability listing, full administrator listing.
//!
//! ## Concurrency
//!
//! Operations are short-lived request/response units with no shared
//! in-process state. The claim and the detail submission are single
//! conditional updates, so two clients racing on the *same* row cannot
//! both win. What remains unguarded is the window between a claim and
//! its overlap sweep: a concurrent claim of an overlapping slot in that
//! window is an accepted gap for this traffic volume, not something
//! this engine tries to solve with locking.

pub mod template;
pub mod time;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::models::session::AdminPrincipal;
use crate::models::slot::{
    ClientDetails, CreateSlotRequest, NewSlot, SlotChanges, SlotStatus, TimeSlot,
};
use crate::store::SlotStore;

/// Result of a successful claim: the updated slot plus what the
/// overlap sweep did (or failed to do).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimOutcome {
    pub slot: TimeSlot,
    pub sweep: SweepReport,
}

/// Outcome of the best-effort overlap sweep that follows a claim.
///
/// The sweep never fails the claim; a storage error shows up here so
/// callers and tests can observe the partial failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepReport {
    /// Ids transitioned to `blocked`.
    pub blocked: Vec<Uuid>,
    /// Present when the sweep hit a storage failure.
    pub error: Option<String>,
}

fn require_admin(admin: Option<&AdminPrincipal>) -> BookingResult<()> {
    match admin {
        Some(_) => Ok(()),
        None => Err(BookingError::Unauthorized),
    }
}

/// Create a single slot in `available` status (administrator only).
pub async fn create_slot(
    store: &dyn SlotStore,
    admin: Option<&AdminPrincipal>,
    req: CreateSlotRequest,
) -> BookingResult<TimeSlot> {
    require_admin(admin)?;

    if req.duration_hours <= 0 {
        return Err(BookingError::Validation(
            "duration_hours must be positive".to_string(),
        ));
    }
    if req.price_ars <= 0 {
        return Err(BookingError::Validation(
            "price_ars must be positive".to_string(),
        ));
    }

    let start_time = time::parse_date_time(&req.date, &req.time)?;
    let slot = store
        .insert_slot(&NewSlot {
            start_time,
            duration_hours: req.duration_hours,
            price_ars: req.price_ars,
        })
        .await?;
    Ok(slot)
}

/// Expand the weekly template over a month and insert whatever is not
/// already in storage (administrator only). Returns the number of
/// inserted slots.
///
/// A batch failure aborts the run and surfaces the storage error;
/// earlier batches stay committed. Re-running is idempotent because
/// candidates are deduplicated against existing rows first.
pub async fn bulk_generate_slots(
    store: &dyn SlotStore,
    admin: Option<&AdminPrincipal>,
    year: i32,
    month: u32,
) -> BookingResult<u64> {
    require_admin(admin)?;

    let (month_start, month_end) = time::month_bounds(year, month)?;
    let existing = store.list_between(month_start, month_end).await?;
    let candidates =
        template::dedup_against_existing(template::month_candidates(year, month)?, &existing);

    let mut inserted = 0u64;
    for batch in candidates.chunks(template::INSERT_BATCH_SIZE) {
        inserted += store.insert_slots(batch).await?;
    }
    Ok(inserted)
}

/// Public availability listing: `available` slots from the start of the
/// studio-local day containing `now`, ascending.
///
/// Never errors to the caller; a storage failure is logged and rendered
/// as an empty list.
pub async fn list_available_slots(store: &dyn SlotStore, now: DateTime<Utc>) -> Vec<TimeSlot> {
    match store.list_available_from(time::start_of_today(now)).await {
        Ok(slots) => slots,
        Err(err) => {
            warn!(error = %err, "failed to list available slots");
            Vec::new()
        }
    }
}

/// Administrator listing of every slot regardless of status.
///
/// Returns an empty list (not an error) without an authenticated
/// administrator, so the caller can render the same page either way.
pub async fn list_all_slots(
    store: &dyn SlotStore,
    admin: Option<&AdminPrincipal>,
) -> BookingResult<Vec<TimeSlot>> {
    if admin.is_none() {
        return Ok(Vec::new());
    }
    Ok(store.list_all().await?)
}

/// Claim a slot on behalf of a prospective client.
///
/// The transition `available -> pending_payment` is one conditional
/// update; when it matches, every other still-available slot on the
/// same studio day that overlaps the claimed interval is swept to
/// `blocked`. Re-claiming a `pending_payment` slot (the same client
/// refreshing) succeeds without touching anything.
pub async fn claim_slot(store: &dyn SlotStore, id: Uuid) -> BookingResult<ClaimOutcome> {
    if let Some(slot) = store.claim_if_available(id).await? {
        let sweep = block_overlapping(store, &slot).await;
        return Ok(ClaimOutcome { slot, sweep });
    }

    // The conditional update matched nothing: missing row or wrong
    // status. Fetch once to tell the caller which.
    let slot = store
        .fetch_slot(id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Slot {id} not found")))?;

    match slot.status {
        SlotStatus::PendingPayment => Ok(ClaimOutcome {
            slot,
            sweep: SweepReport::default(),
        }),
        status => Err(BookingError::NotAvailable(format!(
            "Slot {id} is {status}"
        ))),
    }
}

/// Best-effort sweep: block every other `available` slot on the claimed
/// slot's studio day whose interval overlaps it.
///
/// Failures never unwind the claim. They are logged and reported back
/// through the returned [`SweepReport`].
async fn block_overlapping(store: &dyn SlotStore, claimed: &TimeSlot) -> SweepReport {
    let (day_start, day_end) = time::day_bounds(claimed.start_time);

    let candidates = match store.list_available_between(day_start, day_end).await {
        Ok(candidates) => candidates,
        Err(err) => {
            warn!(slot = %claimed.id, error = %err, "overlap sweep query failed; claim stands");
            return SweepReport {
                blocked: Vec::new(),
                error: Some(err.to_string()),
            };
        }
    };

    let overlapping: Vec<Uuid> = candidates
        .iter()
        .filter(|c| c.id != claimed.id && c.overlaps(claimed))
        .map(|c| c.id)
        .collect();

    if overlapping.is_empty() {
        return SweepReport::default();
    }

    match store.block_slots(&overlapping).await {
        Ok(_) => SweepReport {
            blocked: overlapping,
            error: None,
        },
        Err(err) => {
            warn!(slot = %claimed.id, error = %err, "overlap sweep update failed; claim stands");
            SweepReport {
                blocked: Vec::new(),
                error: Some(err.to_string()),
            }
        }
    }
}

/// Attach client contact details to a claimed (or still available) slot
/// and advance it to `pending`.
pub async fn submit_client_details(
    store: &dyn SlotStore,
    id: Uuid,
    details: ClientDetails,
) -> BookingResult<TimeSlot> {
    let details = details.validated()?;

    if let Some(slot) = store.attach_client_details(id, &details).await? {
        return Ok(slot);
    }

    let slot = store
        .fetch_slot(id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Slot {id} not found")))?;
    Err(BookingError::NotAvailable(format!(
        "Slot {id} is {} and no longer accepts client details",
        slot.status
    )))
}

/// Force a slot into the given status (administrator only).
///
/// Setting `available` liberates the slot: the client fields are
/// cleared in the same statement. `blocked` clears them too, keeping
/// both client-free statuses actually client-free.
pub async fn set_slot_status(
    store: &dyn SlotStore,
    admin: Option<&AdminPrincipal>,
    id: Uuid,
    status: SlotStatus,
) -> BookingResult<()> {
    require_admin(admin)?;

    let clear_client = matches!(status, SlotStatus::Available | SlotStatus::Blocked);
    let found = store.set_status(id, status, clear_client).await?;
    if !found {
        return Err(BookingError::NotFound(format!("Slot {id} not found")));
    }
    Ok(())
}

/// Partially update a slot's schedule or price (administrator only).
pub async fn update_slot(
    store: &dyn SlotStore,
    admin: Option<&AdminPrincipal>,
    id: Uuid,
    changes: SlotChanges,
) -> BookingResult<()> {
    require_admin(admin)?;

    if changes.is_empty() {
        return Err(BookingError::Validation("No fields to update".to_string()));
    }
    if let Some(duration) = changes.duration_hours {
        if duration <= 0 {
            return Err(BookingError::Validation(
                "duration_hours must be positive".to_string(),
            ));
        }
    }
    if let Some(price) = changes.price_ars {
        if price <= 0 {
            return Err(BookingError::Validation(
                "price_ars must be positive".to_string(),
            ));
        }
    }

    let found = store.update_slot(id, &changes).await?;
    if !found {
        return Err(BookingError::NotFound(format!("Slot {id} not found")));
    }
    Ok(())
}

/// Delete a single slot (administrator only).
pub async fn delete_slot(
    store: &dyn SlotStore,
    admin: Option<&AdminPrincipal>,
    id: Uuid,
) -> BookingResult<()> {
    require_admin(admin)?;

    let found = store.delete_slot(id).await?;
    if !found {
        return Err(BookingError::NotFound(format!("Slot {id} not found")));
    }
    Ok(())
}

/// Delete every slot starting within the given studio-local month
/// (administrator only). Returns the number of removed slots.
pub async fn delete_slots_in_month(
    store: &dyn SlotStore,
    admin: Option<&AdminPrincipal>,
    year: i32,
    month: u32,
) -> BookingResult<u64> {
    require_admin(admin)?;

    let (start, end) = time::month_bounds(year, month)?;
    Ok(store.delete_between(start, end).await?)
}
