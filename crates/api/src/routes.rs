/// Administrator agenda endpoints
pub mod admin;
/// Health check endpoints
pub mod health;
/// Public booking endpoints
pub mod slots;
