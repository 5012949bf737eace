use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use tinta_api::middleware::{auth, error_handling::AppError};
use tinta_core::errors::BookingError;

use crate::test_utils::{admin_headers, TestContext, TEST_ADMIN_TOKEN};

#[tokio::test]
async fn test_error_handling_unauthorized() {
    let response = AppError(BookingError::Unauthorized).into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_handling_not_found() {
    let error = BookingError::NotFound("Slot not found".to_string());
    let response = AppError(error).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_not_available() {
    let error = BookingError::NotAvailable("Slot is confirmed".to_string());
    let response = AppError(error).into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let error = BookingError::Validation("Invalid input".to_string());
    let response = AppError(error).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_storage() {
    let error = BookingError::Storage(eyre::eyre!("Database error"));
    let response = AppError(error).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_admin_session_accepts_the_configured_token() {
    let state = TestContext::new().build_state();

    let principal = auth::admin_session(&state, &admin_headers());

    assert_eq!(principal.unwrap().subject, "admin");
}

#[tokio::test]
async fn test_admin_session_rejects_a_wrong_token() {
    let state = TestContext::new().build_state();

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, "Bearer wrong-token".parse().unwrap());

    assert!(auth::admin_session(&state, &headers).is_none());
}

#[tokio::test]
async fn test_admin_session_rejects_a_missing_header() {
    let state = TestContext::new().build_state();

    assert!(auth::admin_session(&state, &HeaderMap::new()).is_none());
}

#[tokio::test]
async fn test_admin_session_requires_the_bearer_scheme() {
    let state = TestContext::new().build_state();

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, TEST_ADMIN_TOKEN.parse().unwrap());

    assert!(auth::admin_session(&state, &headers).is_none());
}

#[tokio::test]
async fn test_admin_session_without_a_configured_token() {
    // A deployment with no token has no admin surface, even when the
    // caller happens to guess a value.
    let state = TestContext::without_admin_token().build_state();

    assert!(auth::admin_session(&state, &admin_headers()).is_none());
}
