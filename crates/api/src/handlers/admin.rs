//! # Administrator Agenda Handlers
//!
//! Privileged operations on the agenda: create and bulk-generate
//! slots, list everything, force statuses, edit and delete. Every
//! handler resolves the admin principal through the identity gate and
//! hands it to the booking engine, which rejects privileged calls
//! without one. The full listing is the one exception by design: an
//! unauthenticated caller gets an empty list, not an error.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;
use tinta_core::{
    booking,
    models::slot::{
        BulkGenerateResponse, CreateSlotRequest, CreateSlotResponse, DeleteMonthResponse,
        MonthQuery, SetStatusRequest, SlotChanges, SlotStatus, TimeSlot,
    },
};
use uuid::Uuid;

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

/// `POST /api/admin/slots` — create a single available slot.
#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateSlotRequest>,
) -> Result<Json<CreateSlotResponse>, AppError> {
    let admin = auth::admin_session(&state, &headers);
    let slot = booking::create_slot(state.store.as_ref(), admin.as_ref(), payload).await?;
    Ok(Json(CreateSlotResponse { slot_id: slot.id }))
}

/// `POST /api/admin/slots/generate` — expand the weekly template over a
/// month, skipping slots that already exist.
#[axum::debug_handler]
pub async fn generate_slots(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(payload): Json<MonthQuery>,
) -> Result<Json<BulkGenerateResponse>, AppError> {
    let admin = auth::admin_session(&state, &headers);
    let inserted = booking::bulk_generate_slots(
        state.store.as_ref(),
        admin.as_ref(),
        payload.year,
        payload.month,
    )
    .await?;
    Ok(Json(BulkGenerateResponse { inserted }))
}

/// `GET /api/admin/slots` — every slot regardless of status. Empty
/// list, not an error, without a valid admin session.
#[axum::debug_handler]
pub async fn list_all(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let admin = auth::admin_session(&state, &headers);
    let slots = booking::list_all_slots(state.store.as_ref(), admin.as_ref()).await?;
    Ok(Json(slots))
}

/// `PUT /api/admin/slots/:id/status` — force a slot into any status.
/// Setting `available` liberates the slot and clears its client fields.
#[axum::debug_handler]
pub async fn set_status(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<StatusCode, AppError> {
    let admin = auth::admin_session(&state, &headers);
    let status: SlotStatus = payload.status.parse()?;
    booking::set_slot_status(state.store.as_ref(), admin.as_ref(), id, status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /api/admin/slots/:id` — partial update of schedule or price.
#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<SlotChanges>,
) -> Result<StatusCode, AppError> {
    let admin = auth::admin_session(&state, &headers);
    booking::update_slot(state.store.as_ref(), admin.as_ref(), id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/admin/slots/:id` — remove a single slot.
#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let admin = auth::admin_session(&state, &headers);
    booking::delete_slot(state.store.as_ref(), admin.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/admin/slots?year=..&month=..` — purge a whole month so
/// it can be regenerated.
#[axum::debug_handler]
pub async fn delete_month(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(query): Query<MonthQuery>,
) -> Result<Json<DeleteMonthResponse>, AppError> {
    let admin = auth::admin_session(&state, &headers);
    let deleted = booking::delete_slots_in_month(
        state.store.as_ref(),
        admin.as_ref(),
        query.year,
        query.month,
    )
    .await?;
    Ok(Json(DeleteMonthResponse { deleted }))
}
