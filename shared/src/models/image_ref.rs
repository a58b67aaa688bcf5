//! Image Reference Model
//!
//! A product image is either already persisted in external storage
//! (durable, survives the form session) or a local-only preview of a
//! file the user selected but has not uploaded yet.

use serde::{Deserialize, Serialize};

/// Host marker identifying a persisted storage URL.
///
/// URL lists loaded from the backend are classified exactly once, at the
/// boundary where they enter a draft: anything containing this substring
/// is durable, everything else is treated as a stale local handle.
pub const STORAGE_HOST_MARKER: &str = "supabase.co";

/// Scheme prefix used for local, in-memory preview handles.
pub const LOCAL_PREVIEW_SCHEME: &str = "blob:";

/// Image reference held by a product draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageRef {
    /// Persisted storage URL
    Durable { url: String },
    /// Transient preview handle, valid only for the current form session
    Local { preview: String },
}

impl ImageRef {
    pub fn durable(url: impl Into<String>) -> Self {
        ImageRef::Durable { url: url.into() }
    }

    pub fn local(preview: impl Into<String>) -> Self {
        ImageRef::Local {
            preview: preview.into(),
        }
    }

    /// Classify a raw URL coming from the backend.
    pub fn classify(url: &str) -> Self {
        if url.contains(STORAGE_HOST_MARKER) {
            ImageRef::durable(url)
        } else {
            ImageRef::local(url)
        }
    }

    pub fn is_durable(&self) -> bool {
        matches!(self, ImageRef::Durable { .. })
    }

    pub fn is_local(&self) -> bool {
        matches!(self, ImageRef::Local { .. })
    }

    /// Storage URL, for durable references only.
    pub fn as_durable_url(&self) -> Option<&str> {
        match self {
            ImageRef::Durable { url } => Some(url),
            ImageRef::Local { .. } => None,
        }
    }

    /// URL to render in the UI regardless of kind.
    pub fn display_url(&self) -> &str {
        match self {
            ImageRef::Durable { url } => url,
            ImageRef::Local { preview } => preview,
        }
    }
}
