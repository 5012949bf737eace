use thiserror::Error;

/// Error taxonomy for every booking operation.
///
/// Privileged-operation and client-transition failures are always
/// returned as values, never panics, so the caller can render a
/// message. Best-effort sub-steps (the overlap sweep) report their
/// failures through [`crate::booking::SweepReport`] instead.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Unauthorized: administrator session required")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not available: {0}")]
    NotAvailable(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),
}

pub type BookingResult<T> = Result<T, BookingError>;
