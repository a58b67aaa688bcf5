//! Backend collaborator contracts
//!
//! The admin core is written against these traits; `NetworkClient`
//! implements all three against the hosted backend, and the mock crate
//! provides in-memory doubles for tests.

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::types::{ProductPage, ProductQuery, UploadFile};
use shared::auth::{AuthUser, Session};
use shared::models::{Product, ProductPayload, Variant};

/// Hosted authentication service
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Sign in with email and password
    async fn login(&self, email: &str, password: &str) -> ClientResult<Session>;

    /// Register a new account
    async fn signup(&self, email: &str, password: &str) -> ClientResult<Session>;

    /// End the current session
    async fn logout(&self) -> ClientResult<()>;

    /// Currently authenticated user, if any
    async fn current_user(&self) -> ClientResult<Option<AuthUser>>;
}

/// Product persistence service
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list(&self, query: &ProductQuery) -> ClientResult<ProductPage>;

    async fn get(&self, id: &str) -> ClientResult<Product>;

    /// Create a product; `variants` are persisted as separate rows
    async fn create(&self, payload: &ProductPayload, variants: &[Variant]) -> ClientResult<Product>;

    /// Update a product, replacing its whole variant set
    async fn update(
        &self,
        id: &str,
        payload: &ProductPayload,
        variants: &[Variant],
    ) -> ClientResult<Product>;

    async fn delete(&self, id: &str) -> ClientResult<()>;
}

/// Hosted image storage
#[async_trait]
pub trait ImageStorageApi: Send + Sync {
    /// Upload one file; returns its durable storage URL
    async fn upload(&self, file: &UploadFile) -> ClientResult<String>;
}
