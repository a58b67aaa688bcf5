//! Local preview handles
//!
//! Each file awaiting upload gets one local preview handle, the
//! in-memory analog of an object URL. Handles must be revoked when
//! their image is removed or the owning form is torn down; anything
//! still alive here is a held resource.

use std::sync::Arc;

use dashmap::DashMap;
use oea_client::types::UploadFile;
use shared::models::LOCAL_PREVIEW_SCHEME;

/// A file the user selected but that has not been durably stored.
///
/// Kept in insertion order, paired 1:1 with the local references in
/// the draft's image list.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub file: UploadFile,
    /// Preview handle synthesized for this file
    pub preview: String,
}

/// Issues and tracks preview handles.
///
/// Clones share the same registry, so a controller and its tests can
/// observe the same set of live handles.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    alive: Arc<DashMap<String, ()>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh preview handle
    pub fn create(&self) -> String {
        let url = format!("{}{}", LOCAL_PREVIEW_SCHEME, uuid::Uuid::new_v4());
        self.alive.insert(url.clone(), ());
        url
    }

    /// Release a handle; returns false if it was already gone
    pub fn revoke(&self, url: &str) -> bool {
        self.alive.remove(url).is_some()
    }

    pub fn is_alive(&self, url: &str) -> bool {
        self.alive.contains_key(url)
    }

    /// Number of handles not yet revoked
    pub fn active_count(&self) -> usize {
        self.alive.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_revoke() {
        let registry = PreviewRegistry::new();

        let url = registry.create();
        assert!(url.starts_with(LOCAL_PREVIEW_SCHEME));
        assert!(registry.is_alive(&url));
        assert_eq!(registry.active_count(), 1);

        assert!(registry.revoke(&url));
        assert!(!registry.is_alive(&url));
        assert_eq!(registry.active_count(), 0);

        // double revoke is a no-op
        assert!(!registry.revoke(&url));
    }

    #[test]
    fn test_handles_are_unique() {
        let registry = PreviewRegistry::new();
        assert_ne!(registry.create(), registry.create());
    }
}
