//! # Tinta Core
//!
//! Domain logic for the studio's appointment system: the `TimeSlot`
//! model and its status state machine, the typed error taxonomy, the
//! `SlotStore` persistence seam, and the booking engine that implements
//! every client- and administrator-facing operation on top of it.
//!
//! This crate has no database or HTTP dependency. The db crate supplies
//! a Postgres-backed `SlotStore`; the api crate wires the engine to
//! axum handlers. Tests drive the engine against an in-memory store.

/// Slot lifecycle operations and the bulk-generation template
pub mod booking;
/// Error taxonomy shared across all crates
pub mod errors;
/// Domain models and request/response types
pub mod models;
/// Persistence trait the booking engine operates through
pub mod store;
