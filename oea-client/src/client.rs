//! Network client for the hosted backend
//!
//! One reqwest-based client implementing the auth, product and storage
//! contracts against the hosted REST APIs (`/auth/v1`, `/rest/v1`,
//! `/storage/v1`).

use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{Method, StatusCode, header};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::api::{AuthApi, ImageStorageApi, ProductApi};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::types::{ProductPage, ProductQuery, UploadFile};
use shared::auth::{AuthUser, Session};
use shared::models::{Product, ProductPayload, Variant};

/// Products table endpoint
const PRODUCTS_PATH: &str = "/rest/v1/products";

/// Variant rows endpoint
const VARIANTS_PATH: &str = "/rest/v1/product_variants";

/// Storage bucket holding product images
const STORAGE_BUCKET: &str = "product-images";

// ============================================================================
// NetworkClient
// ============================================================================

/// HTTP client for the hosted backend
pub struct NetworkClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    token: RwLock<Option<String>>,
}

impl NetworkClient {
    /// Create a new network client
    pub fn new(config: &ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            token: RwLock::new(None),
        }
    }

    /// Current access token, if a session is active
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.write().expect("token lock poisoned") = token;
    }

    fn bearer(&self) -> String {
        self.token().unwrap_or_else(|| self.api_key.clone())
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.bearer()))
    }

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
        let status = resp.status();

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(error_for_status(status, text));
        }

        resp.json().await.map_err(Into::into)
    }

    async fn ensure_success(resp: reqwest::Response) -> ClientResult<()> {
        let status = resp.status();

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(error_for_status(status, text));
        }

        Ok(())
    }

    async fn handle_auth_response<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
        let status = resp.status();

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ClientError::Auth(auth_error_message(status, &text)));
        }

        resp.json().await.map_err(Into::into)
    }

    async fn insert_variants(
        &self,
        product_id: &str,
        variants: &[Variant],
    ) -> ClientResult<Vec<Variant>> {
        let rows: Vec<VariantRow<'_>> = variants
            .iter()
            .map(|variant| VariantRow::new(product_id, variant))
            .collect();

        let resp = self
            .request(Method::POST, VARIANTS_PATH)
            .header("Prefer", "return=representation")
            .json(&rows)
            .send()
            .await?;

        Self::handle_response(resp).await
    }

    /// Replace the whole variant set for a product. No diffing: the
    /// existing rows are dropped and the submitted list is inserted.
    async fn replace_variants(
        &self,
        product_id: &str,
        variants: &[Variant],
    ) -> ClientResult<Vec<Variant>> {
        let resp = self
            .request(Method::DELETE, VARIANTS_PATH)
            .query(&[("product_id", format!("eq.{}", product_id))])
            .send()
            .await?;
        Self::ensure_success(resp).await?;

        if variants.is_empty() {
            return Ok(Vec::new());
        }
        self.insert_variants(product_id, variants).await
    }

    fn public_object_url(&self, object: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, STORAGE_BUCKET, object
        )
    }
}

// ============================================================================
// Collaborator implementations
// ============================================================================

#[async_trait]
impl AuthApi for NetworkClient {
    async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        let body = serde_json::json!({ "email": email, "password": password });
        let resp = self
            .request(Method::POST, "/auth/v1/token?grant_type=password")
            .json(&body)
            .send()
            .await?;

        let session: Session = Self::handle_auth_response(resp).await?;
        self.set_token(Some(session.access_token.clone()));

        tracing::debug!(user_id = %session.user.id, "logged in");
        Ok(session)
    }

    async fn signup(&self, email: &str, password: &str) -> ClientResult<Session> {
        let body = serde_json::json!({ "email": email, "password": password });
        let resp = self
            .request(Method::POST, "/auth/v1/signup")
            .json(&body)
            .send()
            .await?;

        Self::handle_auth_response(resp).await
    }

    async fn logout(&self) -> ClientResult<()> {
        let resp = self.request(Method::POST, "/auth/v1/logout").send().await?;
        Self::ensure_success(resp).await?;

        self.set_token(None);
        tracing::debug!("logged out");
        Ok(())
    }

    async fn current_user(&self) -> ClientResult<Option<AuthUser>> {
        if self.token().is_none() {
            return Ok(None);
        }

        let resp = self.request(Method::GET, "/auth/v1/user").send().await?;
        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status if status.is_success() => {
                let user: AuthUser = resp.json().await?;
                Ok(Some(user))
            }
            status => {
                let text = resp.text().await.unwrap_or_default();
                Err(error_for_status(status, text))
            }
        }
    }
}

#[async_trait]
impl ProductApi for NetworkClient {
    async fn list(&self, query: &ProductQuery) -> ClientResult<ProductPage> {
        let resp = self
            .request(Method::GET, PRODUCTS_PATH)
            .query(&rest_params(query))
            .header("Prefer", "count=exact")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(error_for_status(status, text));
        }

        let total = resp
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range);

        let items: Vec<Product> = resp.json().await?;
        let total = total.unwrap_or(query.offset() as u64 + items.len() as u64);

        Ok(ProductPage::new(items, total, query.page, query.limit))
    }

    async fn get(&self, id: &str) -> ClientResult<Product> {
        let resp = self
            .request(Method::GET, PRODUCTS_PATH)
            .query(&[
                ("id", format!("eq.{}", id)),
                ("select", "*,variants:product_variants(*)".to_string()),
            ])
            .send()
            .await?;

        let mut rows: Vec<Product> = Self::handle_response(resp).await?;
        if rows.is_empty() {
            return Err(ClientError::NotFound(id.to_string()));
        }
        Ok(rows.remove(0))
    }

    async fn create(&self, payload: &ProductPayload, variants: &[Variant]) -> ClientResult<Product> {
        let resp = self
            .request(Method::POST, PRODUCTS_PATH)
            .header("Prefer", "return=representation")
            .json(&[payload])
            .send()
            .await?;

        let mut rows: Vec<Product> = Self::handle_response(resp).await?;
        if rows.is_empty() {
            return Err(ClientError::InvalidResponse("empty insert response".into()));
        }
        let mut product = rows.remove(0);

        if !variants.is_empty() {
            product.variants = self.insert_variants(&product.id, variants).await?;
        }

        tracing::debug!(product_id = %product.id, "product created");
        Ok(product)
    }

    async fn update(
        &self,
        id: &str,
        payload: &ProductPayload,
        variants: &[Variant],
    ) -> ClientResult<Product> {
        let resp = self
            .request(Method::PATCH, PRODUCTS_PATH)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await?;

        let mut rows: Vec<Product> = Self::handle_response(resp).await?;
        if rows.is_empty() {
            return Err(ClientError::NotFound(id.to_string()));
        }
        let mut product = rows.remove(0);

        product.variants = self.replace_variants(id, variants).await?;

        tracing::debug!(product_id = %id, "product updated");
        Ok(product)
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        let resp = self
            .request(Method::DELETE, PRODUCTS_PATH)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;

        Self::ensure_success(resp).await?;
        tracing::debug!(product_id = %id, "product deleted");
        Ok(())
    }
}

#[async_trait]
impl ImageStorageApi for NetworkClient {
    async fn upload(&self, file: &UploadFile) -> ClientResult<String> {
        let object = storage_object_name(file);
        let path = format!("/storage/v1/object/{}/{}", STORAGE_BUCKET, object);

        let resp = self
            .request(Method::POST, &path)
            .header(header::CONTENT_TYPE, &file.content_type)
            .body(file.bytes.clone())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ClientError::Upload(format!("{}: {}", status, text)));
        }

        let url = self.public_object_url(&object);
        tracing::debug!(file_name = %file.file_name, url = %url, "image uploaded");
        Ok(url)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Variant row as stored by the backend
#[derive(Debug, serde::Serialize)]
struct VariantRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    product_id: &'a str,
    name: &'a str,
    stock: i64,
    price: Decimal,
}

impl<'a> VariantRow<'a> {
    fn new(product_id: &'a str, variant: &'a Variant) -> Self {
        Self {
            id: variant.id.as_deref(),
            product_id,
            name: &variant.name,
            stock: variant.stock,
            price: variant.price,
        }
    }
}

fn error_for_status(status: StatusCode, text: String) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden(text),
        StatusCode::NOT_FOUND => ClientError::NotFound(text),
        StatusCode::BAD_REQUEST => ClientError::Validation(text),
        _ => ClientError::Internal(text),
    }
}

/// Best-effort extraction of the human-readable message from an auth
/// error body; falls back to the raw body, then to the status code.
fn auth_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error_description", "msg", "message", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }

    if body.trim().is_empty() {
        status.to_string()
    } else {
        body.trim().to_string()
    }
}

/// Query parameters for a product list request
fn rest_params(query: &ProductQuery) -> Vec<(String, String)> {
    let mut params = vec![
        (
            "select".to_string(),
            "*,variants:product_variants(*)".to_string(),
        ),
        ("limit".to_string(), query.limit.to_string()),
        ("offset".to_string(), query.offset().to_string()),
    ];

    if let Some(term) = &query.search {
        // commas and parens would break the or=() expression
        let term: String = term
            .chars()
            .filter(|c| !matches!(c, ',' | '(' | ')'))
            .collect();
        params.push((
            "or".to_string(),
            format!("(productName.ilike.*{term}*,productTags.ilike.*{term}*)"),
        ));
    }

    let order = query
        .sort
        .map(|sort| sort.order_param())
        .unwrap_or("created_at.desc");
    params.push(("order".to_string(), order.to_string()));

    params
}

/// Total row count from a `Content-Range` header ("0-9/57")
fn parse_content_range(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

/// Unique object name under the bucket, keeping the original extension
fn storage_object_name(file: &UploadFile) -> String {
    format!("products/{}.{}", uuid::Uuid::new_v4(), file.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_range() {
        assert_eq!(parse_content_range("0-9/57"), Some(57));
        assert_eq!(parse_content_range("*/0"), Some(0));
        assert_eq!(parse_content_range("0-9/*"), None);
        assert_eq!(parse_content_range("nonsense"), None);
    }

    #[test]
    fn test_rest_params_pagination_and_order() {
        let query = ProductQuery::all().paginate(2, 10);
        let params = rest_params(&query);

        assert!(params.contains(&("limit".to_string(), "10".to_string())));
        assert!(params.contains(&("offset".to_string(), "20".to_string())));
        assert!(params.contains(&("order".to_string(), "created_at.desc".to_string())));
        assert!(!params.iter().any(|(k, _)| k == "or"));
    }

    #[test]
    fn test_rest_params_search_filters_both_columns() {
        let query = ProductQuery::all().with_search("wid,(get)");
        let params = rest_params(&query);

        let (_, or) = params.iter().find(|(k, _)| k == "or").unwrap();
        assert_eq!(or, "(productName.ilike.*widget*,productTags.ilike.*widget*)");
    }

    #[test]
    fn test_auth_error_message_extraction() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            auth_error_message(status, r#"{"error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(
            auth_error_message(status, r#"{"msg":"User already registered"}"#),
            "User already registered"
        );
        assert_eq!(auth_error_message(status, "plain text"), "plain text");
        assert_eq!(auth_error_message(status, ""), "400 Bad Request");
    }

    #[test]
    fn test_storage_object_name_keeps_extension() {
        let file = UploadFile::new("photo.PNG", "image/png", vec![]);
        let object = storage_object_name(&file);
        assert!(object.starts_with("products/"));
        assert!(object.ends_with(".png"));
    }
}
