use std::fmt;

use boutique_core::{CategoryFilter, Product, ProductId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct CatalogError {
    pub kind: CatalogErrorKind,
    pub message: String,
}

impl CatalogError {
    pub fn new(kind: CatalogErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == CatalogErrorKind::NotFound
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogErrorKind {
    InvalidUrl,
    HttpStatus(u16),
    NotFound,
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    Malformed,
}

impl fmt::Display for CatalogErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogErrorKind::InvalidUrl => write!(f, "invalid url"),
            CatalogErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            CatalogErrorKind::NotFound => write!(f, "not found"),
            CatalogErrorKind::Timeout => write!(f, "timeout"),
            CatalogErrorKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            CatalogErrorKind::Network => write!(f, "network error"),
            CatalogErrorKind::Malformed => write!(f, "malformed payload"),
        }
    }
}

/// A unit of work for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    Page {
        category: CategoryFilter,
        limit: u32,
        page: u32,
    },
    Categories,
    Product {
        product_id: ProductId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogPayload {
    Products(Vec<Product>),
    Categories(Vec<String>),
    Product(Product),
}

/// Completion of a submitted query, tagged with the caller's ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineEvent<T> {
    pub ticket: T,
    pub result: Result<CatalogPayload, CatalogError>,
}
