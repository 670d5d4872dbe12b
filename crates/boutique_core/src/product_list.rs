//! Product list pipeline: page requests, stale-result filtering, search and sort.
//!
//! The list never performs IO itself. Each load operation returns a
//! [`PageRequest`] for the caller to execute, and the result is handed back via
//! [`ProductList::apply_page`]. Every request carries the generation of the
//! initial load it belongs to; results from an older generation are dropped.

use std::cmp::Ordering;

use boutique_logging::{boutique_debug, boutique_warn};

use crate::{CategoryFilter, Product};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::None,
        SortMode::PriceAsc,
        SortMode::PriceDesc,
        SortMode::RatingDesc,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortMode::None => "none",
            SortMode::PriceAsc => "price_asc",
            SortMode::PriceDesc => "price_desc",
            SortMode::RatingDesc => "rating",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(label))
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortMode::None => Ordering::Equal,
            SortMode::PriceAsc => a.price.total_cmp(&b.price),
            SortMode::PriceDesc => b.price.total_cmp(&a.price),
            SortMode::RatingDesc => b.rating.rate.total_cmp(&a.rating.rate),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// First page, shown behind the full-screen loader.
    Initial,
    /// First page reloaded by pull-to-refresh.
    Refresh,
    /// Next page appended below the current items.
    More,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub kind: PageKind,
    pub category: CategoryFilter,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LoadError {
    pub message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductList {
    category: CategoryFilter,
    page: u32,
    page_size: u32,
    products: Vec<Product>,
    search: String,
    sort: SortMode,
    generation: u64,
    loading: bool,
    refreshing: bool,
    loading_more: bool,
    error: Option<String>,
}

impl Default for ProductList {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ProductList {
    pub fn new(page_size: u32) -> Self {
        Self {
            category: CategoryFilter::All,
            page: 1,
            page_size: page_size.max(1),
            products: Vec::new(),
            search: String::new(),
            sort: SortMode::None,
            generation: 0,
            loading: false,
            refreshing: false,
            loading_more: false,
            error: None,
        }
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Everything fetched so far for the current category, in fetch order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Only a first load with nothing to show yet blocks the whole screen.
    pub fn shows_full_screen_loader(&self) -> bool {
        self.loading && self.products.is_empty()
    }

    pub fn load_initial(&mut self) -> PageRequest {
        self.begin_first_page(PageKind::Initial)
    }

    pub fn refresh(&mut self) -> PageRequest {
        self.begin_first_page(PageKind::Refresh)
    }

    /// Switches category and reloads from page 1.
    pub fn set_category(&mut self, category: CategoryFilter) -> PageRequest {
        self.category = category;
        self.page = 1;
        self.load_initial()
    }

    /// Requests the page after the cursor, unless a load is already running or
    /// the last first-page load failed. After such a failure the accumulated
    /// items may still belong to the previous category; page 1 must load first.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if let Some(error) = &self.error {
            boutique_debug!("load_more ignored until page 1 loads: {}", error);
            return None;
        }
        if self.loading_more || self.loading || self.refreshing {
            boutique_debug!(
                "load_more ignored: loading_more={} loading={} refreshing={}",
                self.loading_more,
                self.loading,
                self.refreshing
            );
            return None;
        }
        self.loading_more = true;
        Some(PageRequest {
            generation: self.generation,
            kind: PageKind::More,
            category: self.category.clone(),
            page: self.page.saturating_add(1),
            limit: self.page_size,
        })
    }

    /// Applies a finished request. Returns `false` if it was stale and ignored.
    pub fn apply_page(
        &mut self,
        request: &PageRequest,
        result: Result<Vec<Product>, LoadError>,
    ) -> bool {
        if request.generation != self.generation {
            boutique_debug!(
                "Discarding stale page {} for category {} (generation {} != {})",
                request.page,
                request.category,
                request.generation,
                self.generation
            );
            return false;
        }

        match request.kind {
            PageKind::Initial | PageKind::Refresh => {
                self.loading = false;
                self.refreshing = false;
                match result {
                    Ok(products) => {
                        self.products = products;
                        self.page = 1;
                        self.error = None;
                    }
                    Err(err) => {
                        boutique_warn!(
                            "Loading products for category {} failed: {}",
                            request.category,
                            err
                        );
                        self.error = Some(err.message);
                    }
                }
            }
            PageKind::More => {
                self.loading_more = false;
                match result {
                    Ok(products) if products.is_empty() => {
                        boutique_debug!(
                            "Page {} is empty; cursor stays at {}",
                            request.page,
                            self.page
                        );
                    }
                    Ok(products) => {
                        self.products.extend(products);
                        self.page = request.page;
                    }
                    Err(err) => {
                        boutique_warn!("Loading page {} failed: {}", request.page, err);
                    }
                }
            }
        }
        true
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    /// The accumulated products filtered and sorted with the stored search and sort.
    pub fn displayed(&self) -> Vec<Product> {
        self.apply_view(&self.search, self.sort)
    }

    pub fn apply_view(&self, search: &str, sort: SortMode) -> Vec<Product> {
        apply_view(&self.products, search, sort)
    }

    fn begin_first_page(&mut self, kind: PageKind) -> PageRequest {
        self.generation += 1;
        self.loading = kind == PageKind::Initial;
        self.refreshing = kind == PageKind::Refresh;
        self.loading_more = false;
        self.error = None;
        PageRequest {
            generation: self.generation,
            kind,
            category: self.category.clone(),
            page: 1,
            limit: self.page_size,
        }
    }
}

/// Filters by case-insensitive title substring, then sorts stably.
pub fn apply_view(products: &[Product], search: &str, sort: SortMode) -> Vec<Product> {
    let needle = search.to_lowercase();
    let mut view: Vec<Product> = products
        .iter()
        .filter(|product| needle.is_empty() || product.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    if sort != SortMode::None {
        view.sort_by(|a, b| sort.compare(a, b));
    }
    view
}
