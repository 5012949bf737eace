use axum::{
    routing::{post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/admin/slots",
            post(handlers::admin::create_slot)
                .get(handlers::admin::list_all)
                .delete(handlers::admin::delete_month),
        )
        .route(
            "/api/admin/slots/generate",
            post(handlers::admin::generate_slots),
        )
        .route(
            "/api/admin/slots/:id",
            put(handlers::admin::update_slot).delete(handlers::admin::delete_slot),
        )
        .route(
            "/api/admin/slots/:id/status",
            put(handlers::admin::set_status),
        )
}
