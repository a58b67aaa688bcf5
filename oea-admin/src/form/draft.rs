//! Product draft
//!
//! The working, possibly-invalid copy of a product being created or
//! edited. Validation mirrors the form schema; failures are
//! field-level and block submission before any network call.

use rust_decimal::Decimal;
use shared::models::{ImageRef, Product, ProductPayload, Variant};
use validator::{Validate, ValidationError};

/// Mutable draft of one product record
#[derive(Debug, Clone, Default, Validate)]
pub struct ProductDraft {
    #[validate(custom(function = validate_product_name))]
    pub product_name: String,

    #[validate(length(max = 1000, message = "商品描述不能超過 1000 個字"))]
    pub product_description: Option<String>,

    #[validate(length(min = 1, message = "商品標籤為必須"))]
    pub product_tags: String,

    /// Ordered mix of durable references and local previews
    #[validate(length(max = 5, message = "最多只能上傳 5 張圖片"))]
    pub product_images: Vec<ImageRef>,

    /// Auto-generated on submit when left empty
    pub inventory_number: String,

    #[validate(range(min = 0, message = "庫存數量不能為負數"))]
    pub inventory_quantity: i64,

    #[validate(custom(function = non_negative, message = "匯率不能為負數"))]
    pub exchange_rate: Decimal,

    #[validate(custom(function = non_negative, message = "成本價不能為負數"))]
    pub cost_price: Decimal,

    #[validate(custom(function = non_negative, message = "售價不能為負數"))]
    pub product_price: Decimal,

    #[validate(custom(function = validate_variants))]
    pub variants: Vec<Variant>,
}

impl ProductDraft {
    /// Rebuild a draft from a loaded product, classifying every stored
    /// image URL into a tagged reference at this boundary.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_name: product.product_name.clone(),
            product_description: product.product_description.clone(),
            product_tags: product.product_tags.clone(),
            product_images: product
                .product_images
                .iter()
                .map(|url| ImageRef::classify(url))
                .collect(),
            inventory_number: product.inventory_number.clone(),
            inventory_quantity: product.inventory_quantity,
            exchange_rate: product.exchange_rate,
            cost_price: product.cost_price,
            product_price: product.product_price,
            variants: product.variants.clone(),
        }
    }

    /// Durable URLs currently in the image list, in order
    pub fn durable_image_urls(&self) -> Vec<String> {
        self.product_images
            .iter()
            .filter_map(|image| image.as_durable_url().map(str::to_owned))
            .collect()
    }

    /// Scalar persistence payload with a reconciled image list
    pub fn to_payload(&self, product_images: Vec<String>) -> ProductPayload {
        ProductPayload {
            product_name: self.product_name.clone(),
            product_description: self.product_description.clone(),
            product_tags: self.product_tags.clone(),
            product_images,
            inventory_number: self.inventory_number.clone(),
            inventory_quantity: self.inventory_quantity,
            exchange_rate: self.exchange_rate,
            cost_price: self.cost_price,
            product_price: self.product_price,
        }
    }
}

/// Draft plus form-level flags rules may toggle
#[derive(Debug, Clone)]
pub struct FormState {
    pub draft: ProductDraft,
    /// False while the quantity is derived from variants
    pub quantity_editable: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            draft: ProductDraft::default(),
            quantity_editable: true,
        }
    }
}

fn field_error(code: &'static str, text: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(std::borrow::Cow::Borrowed(text));
    error
}

fn validate_product_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(field_error("required", "商品名稱為必須"));
    }
    if name.chars().count() > 100 {
        return Err(field_error("too_long", "商品名稱不能超過 100 個字"));
    }
    Ok(())
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(field_error("negative", "不能為負數"));
    }
    Ok(())
}

fn validate_variants(variants: &[Variant]) -> Result<(), ValidationError> {
    for variant in variants {
        if variant.name.trim().is_empty() {
            return Err(field_error("variant_name", "規格名稱為必須"));
        }
        if variant.stock < 0 {
            return Err(field_error("variant_stock", "規格庫存不能為負數"));
        }
        if variant.price.is_sign_negative() && !variant.price.is_zero() {
            return Err(field_error("variant_price", "規格價格不能為負數"));
        }
    }
    Ok(())
}
