//! Catalog data models

pub mod image_ref;
pub mod product;

pub use image_ref::{ImageRef, LOCAL_PREVIEW_SCHEME, STORAGE_HOST_MARKER};
pub use product::{Product, ProductPayload, Variant};
