use std::time::Duration;

use async_trait::async_trait;
use boutique_core::{Product, ProductId};
use boutique_logging::boutique_debug;
use futures_util::StreamExt;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{CatalogError, CatalogErrorKind, CatalogSource};

pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 8 * 1024 * 1024,
        }
    }
}

/// HTTP access to the catalog REST API.
#[derive(Debug, Clone)]
pub struct ReqwestCatalog {
    base_url: Url,
    client: reqwest::Client,
    max_bytes: u64,
}

impl ReqwestCatalog {
    pub fn new(settings: CatalogSettings) -> Result<Self, CatalogError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| CatalogError::new(CatalogErrorKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::new(
                CatalogErrorKind::InvalidUrl,
                format!("{base_url} cannot be used as a base url"),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| CatalogError::new(CatalogErrorKind::Network, err.to_string()))?;

        Ok(Self {
            base_url,
            client,
            max_bytes: settings.max_bytes,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base url.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                CatalogError::new(CatalogErrorKind::InvalidUrl, "base url has no path")
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, CatalogError> {
        boutique_debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::new(CatalogErrorKind::NotFound, url.to_string()));
        }
        if !status.is_success() {
            return Err(CatalogError::new(
                CatalogErrorKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(self.too_large(Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(self.too_large(Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        boutique_debug!("GET {} -> {} bytes", url, bytes.len());
        Ok(bytes)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let bytes = self.get_bytes(url).await?;
        decode(&bytes)
    }

    fn too_large(&self, actual: Option<u64>) -> CatalogError {
        CatalogError::new(
            CatalogErrorKind::TooLarge {
                max_bytes: self.max_bytes,
                actual,
            },
            "response too large",
        )
    }
}

#[async_trait]
impl CatalogSource for ReqwestCatalog {
    async fn all_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_json(self.endpoint(&["products"])?).await
    }

    async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        self.get_json(self.endpoint(&["products", "category", category])?)
            .await
    }

    async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        self.get_json(self.endpoint(&["products", "categories"])?)
            .await
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        let id = product_id.to_string();
        let bytes = self.get_bytes(self.endpoint(&["products", id.as_str()])?).await?;
        // Unknown ids may come back as 200 with an empty or null body.
        let body = String::from_utf8_lossy(&bytes);
        let body = body.trim();
        if body.is_empty() || body == "null" {
            return Err(CatalogError::new(
                CatalogErrorKind::NotFound,
                format!("product {product_id}"),
            ));
        }
        decode(&bytes)
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CatalogError> {
    serde_json::from_slice(bytes)
        .map_err(|err| CatalogError::new(CatalogErrorKind::Malformed, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> CatalogError {
    if err.is_timeout() {
        return CatalogError::new(CatalogErrorKind::Timeout, err.to_string());
    }
    CatalogError::new(CatalogErrorKind::Network, err.to_string())
}
