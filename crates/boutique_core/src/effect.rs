use crate::{PageRequest, ProductId};

/// IO the core asks its host to perform; results come back as [`crate::Msg`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchCategories,
    FetchPage(PageRequest),
    FetchProduct { product_id: ProductId },
}
