//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod client;

pub use client::{ClientEntity, ClientPhoneNumberEntity};
