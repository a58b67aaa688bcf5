//! Submission protocol
//!
//! One terminal outcome per invocation: upload pending images, merge
//! the image list, split variants from scalar fields, dispatch the
//! create or update call, then run the success or failure side
//! effects. Busy flags are cleared on every exit path.

use std::sync::Arc;

use thiserror::Error;
use validator::Validate;

use oea_client::error::ClientError;
use oea_client::{ImageStorageApi, ProductApi};
use shared::models::Product;

use super::controller::{FormMode, FormStateController};
use crate::core::events::{CommitHub, CommitListener};
use crate::core::navigation::{Navigator, Route};
use crate::core::notify::{Notifier, ToastKind};
use crate::core::session_store::{SessionStore, load_products_page};

const MSG_CREATE_OK: &str = "商品建立成功";
const MSG_CREATE_FAIL: &str = "商品建立失敗";
const MSG_UPDATE_OK: &str = "商品更新成功";
const MSG_UPDATE_FAIL: &str = "商品更新失敗";
const MSG_DELETE_OK: &str = "商品刪除成功";
const MSG_DELETE_FAIL: &str = "商品刪除失敗";

/// Why a submission did not commit
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Field-level failures; rendered inline, never toasted
    #[error("draft validation failed")]
    Validation(validator::ValidationErrors),

    /// An upload rejected; the whole submission aborts
    #[error("image upload failed: {0}")]
    Upload(#[source] ClientError),

    /// The create/update call failed
    #[error("persistence dispatch failed: {0}")]
    Dispatch(#[source] ClientError),
}

/// Executes the commit protocol against the backend collaborators
pub struct SubmissionOrchestrator {
    products: Arc<dyn ProductApi>,
    storage: Arc<dyn ImageStorageApi>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    session: Arc<dyn SessionStore>,
    commits: CommitHub,
}

impl SubmissionOrchestrator {
    pub fn new(
        products: Arc<dyn ProductApi>,
        storage: Arc<dyn ImageStorageApi>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            products,
            storage,
            notifier,
            navigator,
            session,
            commits: CommitHub::new(),
        }
    }

    /// Register a listener for successful commits
    pub fn subscribe(&mut self, listener: Arc<dyn CommitListener>) {
        self.commits.subscribe(listener);
    }

    /// Run the commit protocol for one validated draft.
    ///
    /// The caller must keep the trigger disabled while
    /// `form.is_submitting()` is set; no second submission should be
    /// started for the same controller until this one resolves.
    pub async fn submit(&self, form: &mut FormStateController) -> Result<Product, SubmitError> {
        if let Err(errors) = form.draft().validate() {
            tracing::debug!(fields = errors.field_errors().len(), "draft rejected by validation");
            return Err(SubmitError::Validation(errors));
        }

        form.begin_submission();
        let result = self.run_protocol(form).await;
        form.end_submission();

        match &result {
            Ok(product) => {
                form.mark_submitted();
                self.commits.emit(Some(&product.id));

                let message = match form.mode() {
                    FormMode::Edit { .. } => MSG_UPDATE_OK,
                    FormMode::Create => MSG_CREATE_OK,
                };
                self.notifier.notify(ToastKind::Success, message);

                let page = load_products_page(self.session.as_ref()).unwrap_or(0);
                self.navigator.navigate_to(Route::Products { page });
            }
            Err(error) => {
                tracing::error!(error = %error, "product submission failed");
                let message = match form.mode() {
                    FormMode::Edit { .. } => MSG_UPDATE_FAIL,
                    FormMode::Create => MSG_CREATE_FAIL,
                };
                self.notifier.notify(ToastKind::Error, message);
            }
        }

        result
    }

    async fn run_protocol(&self, form: &mut FormStateController) -> Result<Product, SubmitError> {
        // 1. synthesize a missing inventory number, visible to the user
        if form.draft().inventory_number.trim().is_empty() {
            let number = shared::util::generate_inventory_number();
            tracing::debug!(inventory_number = %number, "synthesized inventory number");
            form.set_inventory_number(number);
        }

        // 2. upload every pending file concurrently; any failure aborts
        let uploaded = if form.pending_uploads().is_empty() {
            Vec::new()
        } else {
            form.set_uploading(true);
            let uploads = form
                .pending_uploads()
                .iter()
                .map(|pending| self.storage.upload(&pending.file));
            let urls = futures::future::try_join_all(uploads)
                .await
                .map_err(SubmitError::Upload)?;
            form.set_uploading(false);
            urls
        };

        // 3. merge: existing durable references first, then the fresh
        // uploads; local previews are superseded
        let mut image_urls = form.draft().durable_image_urls();
        image_urls.extend(uploaded);

        // 4. split variants from the scalar fields
        let payload = form.draft().to_payload(image_urls);
        let variants = form.draft().variants.clone();

        // 5. exactly one dispatch
        let dispatched = match form.mode().clone() {
            FormMode::Edit { product_id } => {
                self.products.update(&product_id, &payload, &variants).await
            }
            FormMode::Create => self.products.create(&payload, &variants).await,
        };

        dispatched.map_err(SubmitError::Dispatch)
    }

    /// Delete a product: one network call, cache invalidation on
    /// success, a notification either way, no navigation.
    pub async fn delete(&self, product_id: &str) -> Result<(), ClientError> {
        match self.products.delete(product_id).await {
            Ok(()) => {
                self.commits.emit(Some(product_id));
                self.notifier.notify(ToastKind::Success, MSG_DELETE_OK);
                Ok(())
            }
            Err(error) => {
                tracing::error!(product_id = %product_id, error = %error, "product delete failed");
                self.notifier.notify(ToastKind::Error, MSG_DELETE_FAIL);
                Err(error)
            }
        }
    }
}
