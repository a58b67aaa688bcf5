//! OEA Client - HTTP client for the hosted backend
//!
//! Provides network calls to the hosted auth, data and storage APIs, and
//! the collaborator contracts the admin core is written against.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use api::{AuthApi, ImageStorageApi, ProductApi};
pub use client::NetworkClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use types::{ProductPage, ProductQuery, ProductSort, UploadFile};

// Re-export shared types for convenience
pub use shared::auth::{AuthUser, Session};
pub use shared::models::{Product, ProductPayload, Variant};
