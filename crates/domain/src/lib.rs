//! Domain layer for the client manager backend.
//!
//! This crate contains:
//! - Domain models (Client, ContactValues, ClientSearchValues)
//! - Domain error types

pub mod errors;
pub mod models;
