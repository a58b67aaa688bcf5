//! Mock product persistence

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use oea_client::error::{ClientError, ClientResult};
use oea_client::types::{ProductPage, ProductQuery, ProductSort};
use oea_client::ProductApi;
use shared::models::{Product, ProductPayload, Variant};

/// One recorded persistence call
#[derive(Debug, Clone)]
pub enum ProductCall {
    List(ProductQuery),
    Get(String),
    Create {
        payload: ProductPayload,
        variants: Vec<Variant>,
    },
    Update {
        id: String,
        payload: ProductPayload,
        variants: Vec<Variant>,
    },
    Delete(String),
}

/// In-memory product store with call recording
#[derive(Default)]
pub struct MockProductApi {
    products: Mutex<Vec<Product>>,
    calls: Mutex<Vec<ProductCall>>,
    next_id: AtomicU64,
    create_error: Mutex<Option<String>>,
    update_error: Mutex<Option<String>>,
    delete_error: Mutex<Option<String>>,
}

impl MockProductApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing products
    pub fn with_products(self, products: Vec<Product>) -> Self {
        *self.products.lock().unwrap() = products;
        self
    }

    pub fn fail_create_with(&self, message: impl Into<String>) {
        *self.create_error.lock().unwrap() = Some(message.into());
    }

    pub fn fail_update_with(&self, message: impl Into<String>) {
        *self.update_error.lock().unwrap() = Some(message.into());
    }

    pub fn fail_delete_with(&self, message: impl Into<String>) {
        *self.delete_error.lock().unwrap() = Some(message.into());
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<ProductCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that would mutate the store (create/update/delete)
    pub fn mutation_calls(&self) -> Vec<ProductCall> {
        self.calls()
            .into_iter()
            .filter(|call| {
                matches!(
                    call,
                    ProductCall::Create { .. } | ProductCall::Update { .. } | ProductCall::Delete(_)
                )
            })
            .collect()
    }

    pub fn stored(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }

    fn record(&self, call: ProductCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn materialize(&self, payload: &ProductPayload, variants: &[Variant]) -> Product {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let variants = variants
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, mut variant)| {
                variant.id.get_or_insert_with(|| format!("var-{}-{}", n, i));
                variant
            })
            .collect();

        Product {
            id: format!("prod-{}", n),
            product_name: payload.product_name.clone(),
            product_description: payload.product_description.clone(),
            product_tags: payload.product_tags.clone(),
            product_images: payload.product_images.clone(),
            inventory_number: payload.inventory_number.clone(),
            inventory_quantity: payload.inventory_quantity,
            exchange_rate: payload.exchange_rate,
            cost_price: payload.cost_price,
            product_price: payload.product_price,
            variants,
            created_at: Some("2025-01-01T00:00:00Z".to_string()),
            updated_at: Some("2025-01-01T00:00:00Z".to_string()),
        }
    }
}

#[async_trait]
impl ProductApi for MockProductApi {
    async fn list(&self, query: &ProductQuery) -> ClientResult<ProductPage> {
        self.record(ProductCall::List(query.clone()));

        let mut items: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|product| match &query.search {
                None => true,
                Some(term) => {
                    let term = term.to_lowercase();
                    product.product_name.to_lowercase().contains(&term)
                        || product.product_tags.to_lowercase().contains(&term)
                }
            })
            .cloned()
            .collect();

        match query.sort {
            Some(ProductSort::NameAsc) => items.sort_by(|a, b| a.product_name.cmp(&b.product_name)),
            Some(ProductSort::NameDesc) => {
                items.sort_by(|a, b| b.product_name.cmp(&a.product_name))
            }
            Some(ProductSort::PriceAsc) => {
                items.sort_by(|a, b| a.product_price.cmp(&b.product_price))
            }
            Some(ProductSort::PriceDesc) => {
                items.sort_by(|a, b| b.product_price.cmp(&a.product_price))
            }
            _ => {}
        }

        let total = items.len() as u64;
        let start = (query.offset() as usize).min(items.len());
        let end = (start + query.limit as usize).min(items.len());
        let page = items[start..end].to_vec();

        Ok(ProductPage::new(page, total, query.page, query.limit))
    }

    async fn get(&self, id: &str) -> ClientResult<Product> {
        self.record(ProductCall::Get(id.to_string()));

        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(id.to_string()))
    }

    async fn create(&self, payload: &ProductPayload, variants: &[Variant]) -> ClientResult<Product> {
        self.record(ProductCall::Create {
            payload: payload.clone(),
            variants: variants.to_vec(),
        });

        if let Some(message) = self.create_error.lock().unwrap().take() {
            return Err(ClientError::Internal(message));
        }

        let product = self.materialize(payload, variants);
        self.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: &str,
        payload: &ProductPayload,
        variants: &[Variant],
    ) -> ClientResult<Product> {
        self.record(ProductCall::Update {
            id: id.to_string(),
            payload: payload.clone(),
            variants: variants.to_vec(),
        });

        if let Some(message) = self.update_error.lock().unwrap().take() {
            return Err(ClientError::Internal(message));
        }

        let mut products = self.products.lock().unwrap();
        let Some(stored) = products.iter_mut().find(|product| product.id == id) else {
            return Err(ClientError::NotFound(id.to_string()));
        };

        stored.product_name = payload.product_name.clone();
        stored.product_description = payload.product_description.clone();
        stored.product_tags = payload.product_tags.clone();
        stored.product_images = payload.product_images.clone();
        stored.inventory_number = payload.inventory_number.clone();
        stored.inventory_quantity = payload.inventory_quantity;
        stored.exchange_rate = payload.exchange_rate;
        stored.cost_price = payload.cost_price;
        stored.product_price = payload.product_price;
        stored.variants = variants.to_vec();
        stored.updated_at = Some("2025-01-02T00:00:00Z".to_string());

        Ok(stored.clone())
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.record(ProductCall::Delete(id.to_string()));

        if let Some(message) = self.delete_error.lock().unwrap().take() {
            return Err(ClientError::Internal(message));
        }

        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|product| product.id != id);

        if products.len() == before {
            return Err(ClientError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
