//! Repository implementations for database access.

pub mod client;

pub use client::ClientManager;
