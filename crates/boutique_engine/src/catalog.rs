use async_trait::async_trait;
use boutique_core::{CategoryFilter, Product, ProductId};

use crate::CatalogError;

/// Raw upstream catalog: whole collections, no paging.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn all_products(&self) -> Result<Vec<Product>, CatalogError>;

    async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, CatalogError>;

    async fn categories(&self) -> Result<Vec<String>, CatalogError>;

    async fn product(&self, product_id: ProductId) -> Result<Product, CatalogError>;
}

/// Paged catalog as consumed by the product list. Pages are 1-based.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_products(&self, limit: u32, page: u32) -> Result<Vec<Product>, CatalogError>;

    async fn fetch_products_by_category(
        &self,
        category: &str,
        limit: u32,
        page: u32,
    ) -> Result<Vec<Product>, CatalogError>;

    async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError>;

    async fn fetch_product_by_id(&self, product_id: ProductId) -> Result<Product, CatalogError>;

    async fn fetch_page(
        &self,
        category: &CategoryFilter,
        limit: u32,
        page: u32,
    ) -> Result<Vec<Product>, CatalogError> {
        match category {
            CategoryFilter::All => self.fetch_products(limit, page).await,
            CategoryFilter::Only(name) => self.fetch_products_by_category(name, limit, page).await,
        }
    }
}

/// Serves pages by fetching the full collection and slicing it locally.
///
/// The upstream API has no server-side paging. A backend that pages for real
/// should implement [`CatalogClient`] directly instead.
#[derive(Debug, Clone)]
pub struct SlicingCatalog<S> {
    source: S,
}

impl<S> SlicingCatalog<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[async_trait]
impl<S: CatalogSource> CatalogClient for SlicingCatalog<S> {
    async fn fetch_products(&self, limit: u32, page: u32) -> Result<Vec<Product>, CatalogError> {
        let products = self.source.all_products().await?;
        Ok(slice_page(products, limit, page))
    }

    async fn fetch_products_by_category(
        &self,
        category: &str,
        limit: u32,
        page: u32,
    ) -> Result<Vec<Product>, CatalogError> {
        let products = self.source.products_in_category(category).await?;
        Ok(slice_page(products, limit, page))
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError> {
        self.source.categories().await
    }

    async fn fetch_product_by_id(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        self.source.product(product_id).await
    }
}

/// Returns items `[(page-1)*limit, (page-1)*limit + limit)`; page 0 counts as page 1.
pub fn slice_page<T>(items: Vec<T>, limit: u32, page: u32) -> Vec<T> {
    let limit = limit as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(limit);
    items.into_iter().skip(start).take(limit).collect()
}
