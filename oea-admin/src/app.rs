//! Console assembly
//!
//! Wires the collaborators, the query cache and the session store into
//! one ready-to-use application core.

use std::sync::Arc;

use oea_client::{AuthApi, ImageStorageApi, NetworkClient, ProductApi};

use crate::auth::AuthFlow;
use crate::core::navigation::Navigator;
use crate::core::notify::Notifier;
use crate::core::query_cache::QueryCache;
use crate::core::session_store::{MemorySessionStore, SessionStore};
use crate::form::controller::{CreateForms, FormStateController};
use crate::form::submit::SubmissionOrchestrator;
use crate::products::ProductListController;

/// One running admin console
pub struct AdminApp {
    pub auth: AuthFlow,
    pub orchestrator: SubmissionOrchestrator,
    products: Arc<dyn ProductApi>,
    session: Arc<dyn SessionStore>,
    cache: Arc<QueryCache>,
}

impl AdminApp {
    pub fn new(
        auth_api: Arc<dyn AuthApi>,
        products: Arc<dyn ProductApi>,
        storage: Arc<dyn ImageStorageApi>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let cache = Arc::new(QueryCache::new());

        let mut orchestrator = SubmissionOrchestrator::new(
            products.clone(),
            storage,
            notifier.clone(),
            navigator.clone(),
            session.clone(),
        );
        orchestrator.subscribe(cache.clone());

        let auth = AuthFlow::new(auth_api, notifier, navigator, cache.clone());

        Self {
            auth,
            orchestrator,
            products,
            session,
            cache,
        }
    }

    /// Console backed by one network client for all three contracts
    pub fn from_network(
        client: Arc<NetworkClient>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::new(
            client.clone(),
            client.clone(),
            client,
            notifier,
            navigator,
        )
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// List screen state, restoring the remembered page
    pub fn product_list(&self) -> ProductListController {
        ProductListController::new(
            self.products.clone(),
            self.session.clone(),
            self.cache.clone(),
        )
    }

    /// The create screen's two isolated controllers
    pub fn create_forms(&self) -> CreateForms {
        CreateForms::new()
    }

    /// Controller for editing one product
    pub fn edit_form(&self, product_id: impl Into<String>) -> FormStateController {
        FormStateController::edit(product_id)
    }
}
