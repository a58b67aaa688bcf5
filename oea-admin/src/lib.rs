//! OEA Admin core
//!
//! Headless application core for the OEA product-catalog console: form
//! state, draft rules, the submission protocol, and the auth and listing
//! flows. A UI shell binds on top of this crate through the `Notifier`
//! and `Navigator` seams; the hosted backend is reached through the
//! `oea-client` collaborator contracts.

pub mod app;
pub mod auth;
pub mod core;
pub mod form;
pub mod products;

pub use app::AdminApp;
pub use auth::AuthFlow;
pub use form::controller::{CreateForms, FormMode, FormStateController, ImageSelection};
pub use form::submit::{SubmissionOrchestrator, SubmitError};
pub use products::ProductListController;
