//! Client-side API types

use serde::{Deserialize, Serialize};
use shared::models::Product;

/// Default page size for product listings
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// A file selected by the user, awaiting upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Lowercased file extension, defaulting to "jpg"
    pub fn extension(&self) -> String {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_else(|| "jpg".to_string())
    }
}

/// Sort order for product listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    NewestFirst,
    RecentlyUpdated,
}

impl ProductSort {
    /// Backend order expression for this sort key
    pub fn order_param(&self) -> &'static str {
        match self {
            ProductSort::NameAsc => "productName.asc",
            ProductSort::NameDesc => "productName.desc",
            ProductSort::PriceAsc => "productPrice.asc",
            ProductSort::PriceDesc => "productPrice.desc",
            ProductSort::NewestFirst => "created_at.desc",
            ProductSort::RecentlyUpdated => "updated_at.desc",
        }
    }
}

/// List query for products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Page index (0-based)
    pub page: u32,
    /// Items per page
    pub limit: u32,
    /// Case-insensitive match against name and tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<ProductSort>,
}

impl ProductQuery {
    /// Query for the first page with the default limit
    pub fn all() -> Self {
        Self::default()
    }

    /// Select a page
    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    /// Filter by a search term
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Add a sort order
    pub fn order_by(mut self, sort: ProductSort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Row offset of the first item on this page
    pub fn offset(&self) -> u32 {
        self.page * self.limit
    }
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 0,
            limit: DEFAULT_PAGE_LIMIT,
            search: None,
            sort: None,
        }
    }
}

/// One page of a product listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub items: Vec<Product>,
    /// Total matching rows across all pages
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl ProductPage {
    pub fn new(items: Vec<Product>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit > 0 {
            ((total as f64) / (limit as f64)).ceil() as u32
        } else {
            1
        };

        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_query_builder() {
        let query = ProductQuery::all()
            .with_search("widget")
            .order_by(ProductSort::PriceDesc)
            .paginate(2, 20);

        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 20);
        assert_eq!(query.offset(), 40);
        assert_eq!(query.search.as_deref(), Some("widget"));
        assert_eq!(query.sort, Some(ProductSort::PriceDesc));
    }

    #[test]
    fn test_product_page_math() {
        let page = ProductPage::new(vec![], 57, 1, 10);
        assert_eq!(page.total_pages, 6);

        let single = ProductPage::new(vec![], 3, 0, 10);
        assert_eq!(single.total_pages, 1);
    }

    #[test]
    fn test_upload_file_extension() {
        assert_eq!(UploadFile::new("cat.PNG", "image/png", vec![]).extension(), "png");
        assert_eq!(UploadFile::new("noext", "image/jpeg", vec![]).extension(), "jpg");
    }
}
