//! Route descriptors and the navigation seam

use std::sync::Mutex;

use serde::Serialize;

/// Screens the admin console can navigate to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    Login,
    Products { page: u32 },
    ProductDetail { product_id: String },
    ProductCreate,
}

/// Navigation sink; side effect only, nothing is returned to the core
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, route: Route);
}

/// Records every navigation; used by tests and headless drivers
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().expect("route lock poisoned").clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, route: Route) {
        tracing::debug!(?route, "navigate");
        self.routes
            .lock()
            .expect("route lock poisoned")
            .push(route);
    }
}
