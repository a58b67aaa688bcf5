//! In-memory doubles of the hosted backend
//!
//! Deterministic implementations of the `oea-client` collaborator
//! contracts with call recording and scripted failures, used by the
//! admin-core test suites.

pub mod auth;
pub mod products;
pub mod storage;

pub use auth::MockAuthApi;
pub use products::{MockProductApi, ProductCall};
pub use storage::MockImageStorage;
