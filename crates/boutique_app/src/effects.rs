use std::sync::{mpsc, Arc};
use std::thread;

use boutique_core::{Effect, LoadError, Msg, PageRequest, ProductId};
use boutique_engine::{
    CatalogError, CatalogPayload, CatalogQuery, CatalogSettings, ChannelEventSink, EngineEvent,
    EngineHandle,
};
use boutique_logging::{boutique_debug, boutique_warn};

/// What a submitted query was for; routes the completion back to a [`Msg`].
#[derive(Debug, Clone, PartialEq)]
pub enum Ticket {
    Page(PageRequest),
    Categories,
    Product(ProductId),
}

pub struct EffectRunner {
    engine: EngineHandle<Ticket>,
}

impl EffectRunner {
    /// Starts the engine; `forward` receives every completion and returns
    /// `false` once the driver stopped listening.
    pub fn new<F>(settings: CatalogSettings, forward: F) -> Result<Self, CatalogError>
    where
        F: Fn(Msg) -> bool + Send + 'static,
    {
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent<Ticket>>();
        let engine = EngineHandle::new(settings, Arc::new(ChannelEventSink::new(event_tx)))?;
        spawn_event_loop(event_rx, forward);
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            let (ticket, query) = to_query(effect);
            boutique_debug!("Submitting {:?}", query);
            if !self.engine.submit(ticket, query) {
                boutique_warn!("Catalog engine is gone; dropping query");
            }
        }
    }
}

fn spawn_event_loop<F>(event_rx: mpsc::Receiver<EngineEvent<Ticket>>, forward: F)
where
    F: Fn(Msg) -> bool + Send + 'static,
{
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            if !forward(to_msg(event)) {
                break;
            }
        }
    });
}

pub(crate) fn to_query(effect: Effect) -> (Ticket, CatalogQuery) {
    match effect {
        Effect::FetchCategories => (Ticket::Categories, CatalogQuery::Categories),
        Effect::FetchPage(request) => {
            let query = CatalogQuery::Page {
                category: request.category.clone(),
                limit: request.limit,
                page: request.page,
            };
            (Ticket::Page(request), query)
        }
        Effect::FetchProduct { product_id } => {
            (Ticket::Product(product_id), CatalogQuery::Product { product_id })
        }
    }
}

pub(crate) fn to_msg(event: EngineEvent<Ticket>) -> Msg {
    let EngineEvent { ticket, result } = event;
    if let Err(err) = &result {
        boutique_warn!("Catalog query {:?} failed: {}", ticket, err);
    }
    let result = result.map_err(|err| LoadError::new(err.to_string()));

    match ticket {
        Ticket::Categories => Msg::CategoriesLoaded(result.and_then(|payload| match payload {
            CatalogPayload::Categories(names) => Ok(names),
            other => Err(unexpected(&other)),
        })),
        Ticket::Page(request) => Msg::PageLoaded {
            request,
            result: result.and_then(|payload| match payload {
                CatalogPayload::Products(products) => Ok(products),
                other => Err(unexpected(&other)),
            }),
        },
        Ticket::Product(product_id) => Msg::ProductLoaded {
            product_id,
            result: result.and_then(|payload| match payload {
                CatalogPayload::Product(product) => Ok(product),
                other => Err(unexpected(&other)),
            }),
        },
    }
}

fn unexpected(payload: &CatalogPayload) -> LoadError {
    let kind = match payload {
        CatalogPayload::Products(_) => "products",
        CatalogPayload::Categories(_) => "categories",
        CatalogPayload::Product(_) => "product",
    };
    LoadError::new(format!("unexpected {kind} payload"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boutique_core::{CategoryFilter, PageKind, Product, Rating};
    use boutique_engine::CatalogErrorKind;
    use pretty_assertions::assert_eq;

    fn request() -> PageRequest {
        PageRequest {
            generation: 3,
            kind: PageKind::More,
            category: CategoryFilter::from_label("jewelery"),
            page: 2,
            limit: 10,
        }
    }

    fn product(id: u64) -> Product {
        Product {
            id,
            title: format!("Ring {id}"),
            price: 99.5,
            description: String::new(),
            category: "jewelery".to_string(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    #[test]
    fn page_effect_keeps_its_request_as_ticket() {
        let (ticket, query) = to_query(Effect::FetchPage(request()));
        assert_eq!(ticket, Ticket::Page(request()));
        assert_eq!(
            query,
            CatalogQuery::Page {
                category: CategoryFilter::from_label("jewelery"),
                limit: 10,
                page: 2,
            }
        );
    }

    #[test]
    fn completions_become_messages() {
        let msg = to_msg(EngineEvent {
            ticket: Ticket::Page(request()),
            result: Ok(CatalogPayload::Products(vec![product(1)])),
        });
        assert_eq!(
            msg,
            Msg::PageLoaded {
                request: request(),
                result: Ok(vec![product(1)]),
            }
        );

        let msg = to_msg(EngineEvent {
            ticket: Ticket::Product(8),
            result: Err(CatalogError::new(CatalogErrorKind::NotFound, "product 8")),
        });
        assert_eq!(
            msg,
            Msg::ProductLoaded {
                product_id: 8,
                result: Err(LoadError::new("not found: product 8")),
            }
        );
    }

    #[test]
    fn mismatched_payload_is_a_load_error() {
        let msg = to_msg(EngineEvent {
            ticket: Ticket::Categories,
            result: Ok(CatalogPayload::Product(product(2))),
        });
        assert_eq!(
            msg,
            Msg::CategoriesLoaded(Err(LoadError::new("unexpected product payload")))
        );
    }
}
