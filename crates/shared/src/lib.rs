//! Shared utilities for the client manager backend.
//!
//! This crate provides common functionality used across the other crates:
//! - Common validation logic (client names, phone number format)

pub mod validation;
