use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use mockall::predicate;
use pretty_assertions::assert_eq;
use tinta_api::handlers::admin;
use tinta_core::errors::BookingError;
use tinta_core::models::slot::{
    CreateSlotRequest, MonthQuery, SetStatusRequest, SlotChanges, SlotStatus,
};
use uuid::Uuid;

use crate::test_utils::{admin_headers, sample_slot, TestContext};

fn create_request() -> CreateSlotRequest {
    CreateSlotRequest {
        date: "2026-02-03".to_string(),
        time: "15:00".to_string(),
        duration_hours: 3,
        price_ars: 60_000,
    }
}

#[tokio::test]
async fn test_create_slot_success() {
    let mut ctx = TestContext::new();
    let slot = sample_slot(15, 3);
    let slot_id = slot.id;

    ctx.store
        .expect_insert_slot()
        .times(1)
        .returning(move |_| Ok(slot.clone()));

    let result = admin::create_slot(
        State(ctx.build_state()),
        admin_headers(),
        Json(create_request()),
    )
    .await;

    let Json(response) = result.unwrap();
    assert_eq!(response.slot_id, slot_id);
}

#[tokio::test]
async fn test_create_slot_without_token_is_unauthorized() {
    let ctx = TestContext::new();

    let result = admin::create_slot(
        State(ctx.build_state()),
        HeaderMap::new(),
        Json(create_request()),
    )
    .await;

    match result.unwrap_err().0 {
        BookingError::Unauthorized => {}
        e => panic!("Expected Unauthorized error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_create_slot_with_wrong_token_is_unauthorized() {
    let ctx = TestContext::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::AUTHORIZATION,
        "Bearer wrong-token".parse().unwrap(),
    );

    let result = admin::create_slot(State(ctx.build_state()), headers, Json(create_request())).await;

    match result.unwrap_err().0 {
        BookingError::Unauthorized => {}
        e => panic!("Expected Unauthorized error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_generate_slots_inserts_in_batches() {
    let mut ctx = TestContext::new();

    // Empty month: all 48 February candidates survive dedup and go out
    // in batches of 20.
    ctx.store
        .expect_list_between()
        .times(1)
        .returning(|_, _| Ok(vec![]));
    ctx.store
        .expect_insert_slots()
        .times(3)
        .returning(|slots| Ok(slots.len() as u64));

    let result = admin::generate_slots(
        State(ctx.build_state()),
        admin_headers(),
        Json(MonthQuery {
            year: 2026,
            month: 2,
        }),
    )
    .await;

    let Json(response) = result.unwrap();
    assert_eq!(response.inserted, 48);
}

#[tokio::test]
async fn test_generate_slots_rejects_invalid_month() {
    let ctx = TestContext::new();

    let result = admin::generate_slots(
        State(ctx.build_state()),
        admin_headers(),
        Json(MonthQuery {
            year: 2026,
            month: 13,
        }),
    )
    .await;

    match result.unwrap_err().0 {
        BookingError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_list_all_with_session() {
    let mut ctx = TestContext::new();
    let slots = vec![sample_slot(8, 3), sample_slot(15, 3)];
    let listed = slots.clone();

    ctx.store
        .expect_list_all()
        .times(1)
        .returning(move || Ok(listed.clone()));

    let result = admin::list_all(State(ctx.build_state()), admin_headers()).await;

    let Json(returned) = result.unwrap();
    assert_eq!(returned, slots);
}

#[tokio::test]
async fn test_list_all_without_session_is_empty() {
    // No store expectation: the unauthenticated listing never queries.
    let ctx = TestContext::new();

    let result = admin::list_all(State(ctx.build_state()), HeaderMap::new()).await;

    let Json(returned) = result.unwrap();
    assert!(returned.is_empty());
}

#[tokio::test]
async fn test_set_status_liberates_and_clears_client_fields() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.store
        .expect_set_status()
        .with(
            predicate::eq(id),
            predicate::eq(SlotStatus::Available),
            predicate::eq(true),
        )
        .times(1)
        .returning(|_, _, _| Ok(true));

    let result = admin::set_status(
        State(ctx.build_state()),
        admin_headers(),
        Path(id),
        Json(SetStatusRequest {
            status: "available".to_string(),
        }),
    )
    .await;

    assert_eq!(result.unwrap(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_set_status_confirmed_keeps_client_fields() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.store
        .expect_set_status()
        .with(
            predicate::eq(id),
            predicate::eq(SlotStatus::Confirmed),
            predicate::eq(false),
        )
        .times(1)
        .returning(|_, _, _| Ok(true));

    let result = admin::set_status(
        State(ctx.build_state()),
        admin_headers(),
        Path(id),
        Json(SetStatusRequest {
            status: "confirmed".to_string(),
        }),
    )
    .await;

    assert_eq!(result.unwrap(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_set_status_rejects_unknown_status() {
    let ctx = TestContext::new();

    let result = admin::set_status(
        State(ctx.build_state()),
        admin_headers(),
        Path(Uuid::new_v4()),
        Json(SetStatusRequest {
            status: "paid".to_string(),
        }),
    )
    .await;

    match result.unwrap_err().0 {
        BookingError::Validation(_) => {}
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_update_slot_success() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.store
        .expect_update_slot()
        .times(1)
        .returning(|_, _| Ok(true));

    let result = admin::update_slot(
        State(ctx.build_state()),
        admin_headers(),
        Path(id),
        Json(SlotChanges {
            price_ars: Some(75_000),
            ..Default::default()
        }),
    )
    .await;

    assert_eq!(result.unwrap(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_update_slot_not_found() {
    let mut ctx = TestContext::new();

    ctx.store
        .expect_update_slot()
        .times(1)
        .returning(|_, _| Ok(false));

    let result = admin::update_slot(
        State(ctx.build_state()),
        admin_headers(),
        Path(Uuid::new_v4()),
        Json(SlotChanges {
            price_ars: Some(75_000),
            ..Default::default()
        }),
    )
    .await;

    match result.unwrap_err().0 {
        BookingError::NotFound(_) => {}
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_delete_slot_success() {
    let mut ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.store
        .expect_delete_slot()
        .with(predicate::eq(id))
        .times(1)
        .returning(|_| Ok(true));

    let result = admin::delete_slot(State(ctx.build_state()), admin_headers(), Path(id)).await;

    assert_eq!(result.unwrap(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_month() {
    let mut ctx = TestContext::new();

    ctx.store
        .expect_delete_between()
        .times(1)
        .returning(|_, _| Ok(12));

    let result = admin::delete_month(
        State(ctx.build_state()),
        admin_headers(),
        Query(MonthQuery {
            year: 2026,
            month: 2,
        }),
    )
    .await;

    let Json(response) = result.unwrap();
    assert_eq!(response.deleted, 12);
}

#[tokio::test]
async fn test_delete_month_without_token_is_unauthorized() {
    let ctx = TestContext::new();

    let result = admin::delete_month(
        State(ctx.build_state()),
        HeaderMap::new(),
        Query(MonthQuery {
            year: 2026,
            month: 2,
        }),
    )
    .await;

    match result.unwrap_err().0 {
        BookingError::Unauthorized => {}
        e => panic!("Expected Unauthorized error, got: {:?}", e),
    }
}
