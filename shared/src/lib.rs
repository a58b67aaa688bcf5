//! Shared types for the OEA admin console
//!
//! Common types used across the client and admin crates: catalog
//! models, auth DTOs and small utility helpers.

pub mod auth;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
