//! Domain models for the client manager.

pub mod client;

pub use client::{Client, ClientSearchValues, ContactValues};
