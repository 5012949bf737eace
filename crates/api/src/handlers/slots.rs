//! # Public Booking Handlers
//!
//! The client-facing half of the API: browse availability, claim a
//! slot, and submit contact details for a claimed slot. None of these
//! require a session; the booking engine gates every transition on the
//! slot's current status instead.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tinta_core::{
    booking::{self, ClaimOutcome},
    models::slot::{ClientDetails, TimeSlot},
};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// `GET /api/slots` — upcoming available slots, ascending.
///
/// Deliberately infallible at the HTTP level: a storage failure is
/// logged by the engine and rendered as an empty list.
#[axum::debug_handler]
pub async fn list_available(State(state): State<Arc<ApiState>>) -> Json<Vec<TimeSlot>> {
    Json(booking::list_available_slots(state.store.as_ref(), Utc::now()).await)
}

/// `POST /api/slots/:id/claim` — reserve a slot pending payment.
///
/// Succeeds for `available` slots (blocking any overlapping slots on
/// the same day) and idempotently for slots already in
/// `pending_payment`; anything else is a conflict.
#[axum::debug_handler]
pub async fn claim_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimOutcome>, AppError> {
    let outcome = booking::claim_slot(state.store.as_ref(), id).await?;
    Ok(Json(outcome))
}

/// `POST /api/slots/:id/details` — attach the client's contact details
/// and advance the slot to `pending`.
#[axum::debug_handler]
pub async fn submit_details(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClientDetails>,
) -> Result<Json<TimeSlot>, AppError> {
    let slot = booking::submit_client_details(state.store.as_ref(), id, payload).await?;
    Ok(Json(slot))
}
