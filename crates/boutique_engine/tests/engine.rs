use std::collections::HashMap;
use std::sync::{mpsc, Arc, Once};
use std::time::Duration;

use async_trait::async_trait;
use boutique_core::{CategoryFilter, Product, ProductId, Rating};
use boutique_engine::{
    run_query, CatalogClient, CatalogError, CatalogErrorKind, CatalogPayload, CatalogQuery,
    ChannelEventSink, EngineEvent, EngineHandle,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(boutique_logging::initialize_for_tests);
}

fn product(id: u64, category: &str) -> Product {
    Product {
        id,
        title: format!("Item {id}"),
        price: id as f64,
        description: String::new(),
        category: category.to_string(),
        image: String::new(),
        rating: Rating::default(),
    }
}

/// In-memory catalog that pages by itself and can delay answers per page.
struct StubCatalog {
    products: Vec<Product>,
    delays: HashMap<u32, Duration>,
}

impl StubCatalog {
    fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            delays: HashMap::new(),
        }
    }

    fn page(&self, filter: &CategoryFilter, limit: u32, page: u32) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| filter.matches(p))
            .skip((page.max(1) - 1) as usize * limit as usize)
            .take(limit as usize)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CatalogClient for StubCatalog {
    async fn fetch_products(&self, limit: u32, page: u32) -> Result<Vec<Product>, CatalogError> {
        if let Some(delay) = self.delays.get(&page) {
            tokio::time::sleep(*delay).await;
        }
        Ok(self.page(&CategoryFilter::All, limit, page))
    }

    async fn fetch_products_by_category(
        &self,
        category: &str,
        limit: u32,
        page: u32,
    ) -> Result<Vec<Product>, CatalogError> {
        Ok(self.page(&CategoryFilter::from_label(category), limit, page))
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError> {
        let mut names: Vec<String> = self.products.iter().map(|p| p.category.clone()).collect();
        names.dedup();
        Ok(names)
    }

    async fn fetch_product_by_id(&self, product_id: ProductId) -> Result<Product, CatalogError> {
        match self.products.iter().find(|p| p.id == product_id) {
            Some(found) => Ok(found.clone()),
            None => Err(CatalogError::new(
                CatalogErrorKind::NotFound,
                format!("product {product_id}"),
            )),
        }
    }
}

fn sample() -> Vec<Product> {
    vec![
        product(1, "books"),
        product(2, "books"),
        product(3, "games"),
        product(4, "games"),
    ]
}

#[tokio::test]
async fn run_query_dispatches_by_query_kind() {
    let client = StubCatalog::new(sample());

    let page = run_query(
        &client,
        &CatalogQuery::Page {
            category: CategoryFilter::from_label("games"),
            limit: 1,
            page: 2,
        },
    )
    .await
    .expect("page");
    assert_eq!(page, CatalogPayload::Products(vec![product(4, "games")]));

    let categories = run_query(&client, &CatalogQuery::Categories)
        .await
        .expect("categories");
    assert_eq!(
        categories,
        CatalogPayload::Categories(vec!["books".to_string(), "games".to_string()])
    );

    let single = run_query(&client, &CatalogQuery::Product { product_id: 3 })
        .await
        .expect("product");
    assert_eq!(single, CatalogPayload::Product(product(3, "games")));

    assert!(run_query(&client, &CatalogQuery::Product { product_id: 99 })
        .await
        .is_err());
}

#[test]
fn engine_reports_each_ticket_once() {
    init_logging();
    let (tx, rx) = mpsc::channel::<EngineEvent<u32>>();
    let engine = EngineHandle::with_client(
        Arc::new(StubCatalog::new(sample())),
        Arc::new(ChannelEventSink::new(tx)),
    );

    assert!(engine.submit(1, CatalogQuery::Categories));
    assert!(engine.submit(
        2,
        CatalogQuery::Page {
            category: CategoryFilter::All,
            limit: 3,
            page: 1,
        }
    ));

    let mut events: Vec<EngineEvent<u32>> = (0..2)
        .map(|_| rx.recv_timeout(Duration::from_secs(5)).expect("event"))
        .collect();
    events.sort_by_key(|event| event.ticket);

    assert_eq!(events[0].ticket, 1);
    assert!(matches!(
        events[0].result,
        Ok(CatalogPayload::Categories(_))
    ));
    match &events[1].result {
        Ok(CatalogPayload::Products(products)) => {
            assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn slow_queries_do_not_block_later_ones() {
    init_logging();
    let mut stub = StubCatalog::new(sample());
    stub.delays.insert(1, Duration::from_millis(500));
    let (tx, rx) = mpsc::channel::<EngineEvent<&'static str>>();
    let engine = EngineHandle::with_client(Arc::new(stub), Arc::new(ChannelEventSink::new(tx)));

    let page = |page| CatalogQuery::Page {
        category: CategoryFilter::All,
        limit: 2,
        page,
    };
    assert!(engine.submit("slow", page(1)));
    assert!(engine.submit("fast", page(2)));

    let first = rx.recv_timeout(Duration::from_secs(5)).expect("first");
    let second = rx.recv_timeout(Duration::from_secs(5)).expect("second");
    assert_eq!(first.ticket, "fast");
    assert_eq!(second.ticket, "slow");
}
