//! Persistence layer for the client manager backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - The client repository (schema lifecycle, CRUD, search)

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
