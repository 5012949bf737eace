use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/slots", get(handlers::slots::list_available))
        .route("/api/slots/:id/claim", post(handlers::slots::claim_slot))
        .route(
            "/api/slots/:id/details",
            post(handlers::slots::submit_details),
        )
}
