//! Form state controller
//!
//! Owns one product draft and its pending-upload set for the lifetime
//! of one form (create or edit). All mutations go through here so the
//! registered draft rules see every change.

use std::sync::Arc;

use oea_client::types::UploadFile;
use shared::models::{ImageRef, Product};

use super::FormError;
use super::draft::{FormState, ProductDraft};
use super::preview::{PendingUpload, PreviewRegistry};
use super::rules::{DerivedQuantityRule, DraftRule, FieldPath};

/// Hard cap on images per product
pub const MAX_PRODUCT_IMAGES: usize = 5;

/// Whether the form creates a new product or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { product_id: String },
}

/// Outcome of an image selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSelection {
    /// Files appended to the pending-upload set
    pub accepted: usize,
    /// Files dropped because the batch exceeded remaining capacity;
    /// non-zero means the user should see a truncation warning
    pub dropped: usize,
}

/// Draft owner for one form lifecycle
pub struct FormStateController {
    mode: FormMode,
    state: FormState,
    pending: Vec<PendingUpload>,
    previews: PreviewRegistry,
    rules: Vec<Arc<dyn DraftRule>>,
    /// Identity of the last applied edit snapshot; a repeat call with
    /// the same snapshot must not reset the draft
    loaded: Option<Arc<Product>>,
    submitting: bool,
    uploading: bool,
}

impl FormStateController {
    /// Controller for an empty create draft
    pub fn create() -> Self {
        Self::with_mode(FormMode::Create)
    }

    /// Controller for editing an existing product. The record itself
    /// usually arrives later; pass it to [`initialize`](Self::initialize).
    pub fn edit(product_id: impl Into<String>) -> Self {
        Self::with_mode(FormMode::Edit {
            product_id: product_id.into(),
        })
    }

    fn with_mode(mode: FormMode) -> Self {
        Self {
            mode,
            state: FormState::default(),
            pending: Vec::new(),
            previews: PreviewRegistry::new(),
            rules: vec![Arc::new(DerivedQuantityRule)],
            loaded: None,
            submitting: false,
            uploading: false,
        }
    }

    /// Register an additional draft rule
    pub fn add_rule(&mut self, rule: Arc<dyn DraftRule>) {
        self.rules.push(rule);
    }

    /// Reset the draft from a loaded record and drop any pending
    /// uploads. Idempotent per snapshot: only a new `data` reference
    /// resets; calling again with the same one is a no-op.
    pub fn initialize(&mut self, data: &Arc<Product>) {
        if let Some(previous) = &self.loaded {
            if Arc::ptr_eq(previous, data) {
                return;
            }
        }

        self.clear_pending(true);
        self.state.draft = ProductDraft::from_product(data);
        self.state.quantity_editable = true;
        self.loaded = Some(Arc::clone(data));

        tracing::debug!(product_id = %data.id, "draft reset from loaded record");
        self.notify(FieldPath::Variants);
    }

    // ============ accessors ============

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.state.draft
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn pending_uploads(&self) -> &[PendingUpload] {
        &self.pending
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    pub fn quantity_editable(&self) -> bool {
        self.state.quantity_editable
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    // ============ field setters ============

    pub fn set_product_name(&mut self, name: impl Into<String>) {
        self.state.draft.product_name = name.into();
        self.notify(FieldPath::ProductName);
    }

    pub fn set_product_description(&mut self, description: Option<String>) {
        self.state.draft.product_description = description;
        self.notify(FieldPath::ProductDescription);
    }

    pub fn set_product_tags(&mut self, tags: impl Into<String>) {
        self.state.draft.product_tags = tags.into();
        self.notify(FieldPath::ProductTags);
    }

    pub fn set_inventory_number(&mut self, number: impl Into<String>) {
        self.state.draft.inventory_number = number.into();
        self.notify(FieldPath::InventoryNumber);
    }

    /// Direct quantity edits are rejected while variants drive the field
    pub fn set_inventory_quantity(&mut self, quantity: i64) -> Result<(), FormError> {
        if !self.state.quantity_editable {
            return Err(FormError::QuantityDerived);
        }
        self.state.draft.inventory_quantity = quantity;
        self.notify(FieldPath::InventoryQuantity);
        Ok(())
    }

    pub fn set_exchange_rate(&mut self, rate: rust_decimal::Decimal) {
        self.state.draft.exchange_rate = rate;
        self.notify(FieldPath::ExchangeRate);
    }

    pub fn set_cost_price(&mut self, price: rust_decimal::Decimal) {
        self.state.draft.cost_price = price;
        self.notify(FieldPath::CostPrice);
    }

    pub fn set_product_price(&mut self, price: rust_decimal::Decimal) {
        self.state.draft.product_price = price;
        self.notify(FieldPath::ProductPrice);
    }

    // ============ variants ============

    pub fn add_variant(&mut self, variant: shared::models::Variant) {
        self.state.draft.variants.push(variant);
        self.notify(FieldPath::Variants);
    }

    /// No-op when the index is out of range
    pub fn remove_variant(&mut self, index: usize) {
        if index >= self.state.draft.variants.len() {
            return;
        }
        self.state.draft.variants.remove(index);
        self.notify(FieldPath::Variants);
    }

    pub fn set_variant(&mut self, index: usize, variant: shared::models::Variant) {
        let Some(slot) = self.state.draft.variants.get_mut(index) else {
            return;
        };
        *slot = variant;
        self.notify(FieldPath::Variants);
    }

    pub fn set_variant_stock(&mut self, index: usize, stock: i64) {
        let Some(variant) = self.state.draft.variants.get_mut(index) else {
            return;
        };
        variant.stock = stock;
        self.notify(FieldPath::Variants);
    }

    // ============ images ============

    /// Append newly chosen files as local previews.
    ///
    /// A full image list rejects the whole batch; otherwise the batch
    /// is truncated to the remaining capacity. No upload happens here.
    pub fn select_images(&mut self, files: Vec<UploadFile>) -> Result<ImageSelection, FormError> {
        if files.is_empty() {
            return Ok(ImageSelection {
                accepted: 0,
                dropped: 0,
            });
        }

        let current = self.state.draft.product_images.len();
        if current >= MAX_PRODUCT_IMAGES {
            return Err(FormError::ImageLimitReached);
        }

        let slots = MAX_PRODUCT_IMAGES - current;
        let total = files.len();
        let accepted = total.min(slots);
        let dropped = total - accepted;

        for file in files.into_iter().take(accepted) {
            let preview = self.previews.create();
            self.state
                .draft
                .product_images
                .push(ImageRef::local(&preview));
            self.pending.push(PendingUpload { file, preview });
        }

        if dropped > 0 {
            tracing::warn!(accepted, dropped, "image batch truncated to capacity");
        }

        self.notify(FieldPath::ProductImages);
        Ok(ImageSelection { accepted, dropped })
    }

    /// Remove one image. Local references also drop their paired
    /// pending upload (matched by position among local references) and
    /// release the preview handle. Out-of-range indexes are a no-op.
    pub fn remove_image(&mut self, index: usize) {
        let Some(entry) = self.state.draft.product_images.get(index) else {
            return;
        };

        if entry.is_local() {
            let local_position = self.state.draft.product_images[..index]
                .iter()
                .filter(|image| image.is_local())
                .count();

            if local_position < self.pending.len() {
                let removed = self.pending.remove(local_position);
                self.previews.revoke(&removed.preview);
            }
        }

        self.state.draft.product_images.remove(index);
        self.notify(FieldPath::ProductImages);
    }

    // ============ submission support ============

    pub(crate) fn begin_submission(&mut self) {
        self.submitting = true;
    }

    pub(crate) fn set_uploading(&mut self, uploading: bool) {
        self.uploading = uploading;
    }

    /// Guaranteed cleanup; runs on every submission exit path
    pub(crate) fn end_submission(&mut self) {
        self.submitting = false;
        self.uploading = false;
    }

    /// Success path: the pending files were consumed by the upload
    /// step. Their previews are superseded by durable references, not
    /// leaked, so they are not revoked here.
    pub(crate) fn mark_submitted(&mut self) {
        self.pending.clear();
    }

    fn clear_pending(&mut self, revoke: bool) {
        if revoke {
            for pending in &self.pending {
                self.previews.revoke(&pending.preview);
            }
        }
        self.pending.clear();
    }

    fn notify(&mut self, changed: FieldPath) {
        let rules = self.rules.clone();
        for rule in rules {
            rule.apply(changed, &mut self.state);
        }
    }
}

impl Drop for FormStateController {
    fn drop(&mut self) {
        // teardown releases every still-pending preview handle
        self.clear_pending(true);
    }
}

/// The create screen keeps two fully independent controllers, one for
/// the fast-entry dialog and one for the full form, so the two drafts
/// can never contaminate each other.
pub struct CreateForms {
    pub fast: FormStateController,
    pub normal: FormStateController,
}

impl CreateForms {
    pub fn new() -> Self {
        Self {
            fast: FormStateController::create(),
            normal: FormStateController::create(),
        }
    }
}

impl Default for CreateForms {
    fn default() -> Self {
        Self::new()
    }
}
