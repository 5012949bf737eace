/// Administrator agenda handlers
pub mod admin;
/// Public booking-flow handlers
pub mod slots;
