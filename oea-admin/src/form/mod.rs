//! Product form state
//!
//! The draft record, its pending-image lifecycle, the reactive rules
//! that keep derived fields in sync, and the submission protocol.

pub mod controller;
pub mod draft;
pub mod preview;
pub mod rules;
pub mod submit;

use thiserror::Error;

pub use controller::{CreateForms, FormMode, FormStateController, ImageSelection, MAX_PRODUCT_IMAGES};
pub use draft::{FormState, ProductDraft};
pub use preview::{PendingUpload, PreviewRegistry};
pub use rules::{DerivedQuantityRule, DraftRule, FieldPath};
pub use submit::{SubmissionOrchestrator, SubmitError};

/// Errors raised by draft mutation operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// The image list is at capacity; the whole batch was rejected
    #[error("image list is full ({} max)", MAX_PRODUCT_IMAGES)]
    ImageLimitReached,

    /// Quantity is derived from variants and cannot be edited directly
    #[error("inventory quantity is derived from variants")]
    QuantityDerived,
}
