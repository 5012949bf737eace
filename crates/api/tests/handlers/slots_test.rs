use axum::extract::{Path, State};
use axum::Json;
use mockall::predicate;
use pretty_assertions::assert_eq;
use tinta_api::handlers::slots;
use tinta_core::errors::BookingError;
use tinta_core::models::slot::{ClientDetails, SlotStatus};
use uuid::Uuid;

use crate::test_utils::{sample_slot, TestContext};

fn valid_details() -> ClientDetails {
    ClientDetails {
        name: "Ana".to_string(),
        email: "a@x.com".to_string(),
        phone: "+54911...".to_string(),
        instagram: None,
    }
}

#[tokio::test]
async fn test_list_available_returns_slots() {
    let mut ctx = TestContext::new();
    let slot = sample_slot(15, 3);
    let listed = slot.clone();

    ctx.store
        .expect_list_available_from()
        .times(1)
        .returning(move |_| Ok(vec![listed.clone()]));

    let Json(slots) = slots::list_available(State(ctx.build_state())).await;

    assert_eq!(slots, vec![slot]);
}

#[tokio::test]
async fn test_list_available_swallows_storage_failure() {
    let mut ctx = TestContext::new();

    ctx.store
        .expect_list_available_from()
        .times(1)
        .returning(|_| Err(eyre::eyre!("connection refused")));

    let Json(slots) = slots::list_available(State(ctx.build_state())).await;

    assert!(slots.is_empty());
}

#[tokio::test]
async fn test_claim_slot_success() {
    let mut ctx = TestContext::new();
    let mut slot = sample_slot(15, 3);
    slot.status = SlotStatus::PendingPayment;
    let claimed = slot.clone();

    ctx.store
        .expect_claim_if_available()
        .with(predicate::eq(slot.id))
        .times(1)
        .returning(move |_| Ok(Some(claimed.clone())));
    // No other slot that day, so the sweep has nothing to block
    ctx.store
        .expect_list_available_between()
        .times(1)
        .returning(|_, _| Ok(vec![]));

    let result = slots::claim_slot(State(ctx.build_state()), Path(slot.id)).await;

    let Json(outcome) = result.unwrap();
    assert_eq!(outcome.slot.status, SlotStatus::PendingPayment);
    assert!(outcome.sweep.blocked.is_empty());
    assert!(outcome.sweep.error.is_none());
}

#[tokio::test]
async fn test_claim_slot_blocks_overlapping_neighbor() {
    let mut ctx = TestContext::new();
    let mut slot = sample_slot(15, 3);
    slot.status = SlotStatus::PendingPayment;
    let other = sample_slot(17, 3);
    let other_id = other.id;

    let claimed = slot.clone();
    ctx.store
        .expect_claim_if_available()
        .times(1)
        .returning(move |_| Ok(Some(claimed.clone())));
    ctx.store
        .expect_list_available_between()
        .times(1)
        .returning(move |_, _| Ok(vec![other.clone()]));
    ctx.store
        .expect_block_slots()
        .withf(move |ids| ids == [other_id])
        .times(1)
        .returning(|ids| Ok(ids.len() as u64));

    let result = slots::claim_slot(State(ctx.build_state()), Path(slot.id)).await;

    let Json(outcome) = result.unwrap();
    assert_eq!(outcome.sweep.blocked, vec![other_id]);
}

#[tokio::test]
async fn test_claim_slot_conflict() {
    let mut ctx = TestContext::new();
    let mut slot = sample_slot(15, 3);
    slot.status = SlotStatus::Confirmed;
    let id = slot.id;

    ctx.store
        .expect_claim_if_available()
        .times(1)
        .returning(|_| Ok(None));
    ctx.store
        .expect_fetch_slot()
        .with(predicate::eq(id))
        .times(1)
        .returning(move |_| Ok(Some(slot.clone())));

    let result = slots::claim_slot(State(ctx.build_state()), Path(id)).await;

    match result.unwrap_err().0 {
        BookingError::NotAvailable(_) => {}
        e => panic!("Expected NotAvailable error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_claim_slot_not_found() {
    let mut ctx = TestContext::new();

    ctx.store
        .expect_claim_if_available()
        .times(1)
        .returning(|_| Ok(None));
    ctx.store
        .expect_fetch_slot()
        .times(1)
        .returning(|_| Ok(None));

    let result = slots::claim_slot(State(ctx.build_state()), Path(Uuid::new_v4())).await;

    match result.unwrap_err().0 {
        BookingError::NotFound(_) => {}
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_submit_details_success() {
    let mut ctx = TestContext::new();
    let mut slot = sample_slot(15, 3);
    slot.status = SlotStatus::Pending;
    slot.client_name = Some("Ana".to_string());
    slot.client_email = Some("a@x.com".to_string());
    slot.client_phone = Some("+54911...".to_string());
    let id = slot.id;

    let updated = slot.clone();
    ctx.store
        .expect_attach_client_details()
        .times(1)
        .returning(move |_, _| Ok(Some(updated.clone())));

    let result =
        slots::submit_details(State(ctx.build_state()), Path(id), Json(valid_details())).await;

    let Json(returned) = result.unwrap();
    assert_eq!(returned.status, SlotStatus::Pending);
    assert_eq!(returned.client_name.as_deref(), Some("Ana"));
}

#[tokio::test]
async fn test_submit_details_rejects_invalid_payload() {
    // Validation fails before any store call; the mock has no
    // expectations and would panic if one were made.
    let ctx = TestContext::new();

    let mut details = valid_details();
    details.email = "not-an-email".to_string();

    let result =
        slots::submit_details(State(ctx.build_state()), Path(Uuid::new_v4()), Json(details)).await;

    match result.unwrap_err().0 {
        BookingError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_submit_details_conflict_after_confirmation() {
    let mut ctx = TestContext::new();
    let mut slot = sample_slot(15, 3);
    slot.status = SlotStatus::Confirmed;
    let id = slot.id;

    ctx.store
        .expect_attach_client_details()
        .times(1)
        .returning(|_, _| Ok(None));
    ctx.store
        .expect_fetch_slot()
        .times(1)
        .returning(move |_| Ok(Some(slot.clone())));

    let result =
        slots::submit_details(State(ctx.build_state()), Path(id), Json(valid_details())).await;

    match result.unwrap_err().0 {
        BookingError::NotAvailable(_) => {}
        e => panic!("Expected NotAvailable error, got: {:?}", e),
    }
}
