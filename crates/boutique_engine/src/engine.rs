use std::sync::{mpsc, Arc};
use std::thread;

use boutique_logging::{boutique_debug, boutique_error};

use crate::{
    CatalogClient, CatalogError, CatalogPayload, CatalogQuery, CatalogSettings, EngineEvent,
    ReqwestCatalog, SlicingCatalog,
};

pub trait EventSink<T>: Send + Sync {
    fn emit(&self, event: EngineEvent<T>);
}

pub struct ChannelEventSink<T> {
    tx: mpsc::Sender<EngineEvent<T>>,
}

impl<T> ChannelEventSink<T> {
    pub fn new(tx: mpsc::Sender<EngineEvent<T>>) -> Self {
        Self { tx }
    }
}

impl<T: Send> EventSink<T> for ChannelEventSink<T> {
    fn emit(&self, event: EngineEvent<T>) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand<T> {
    Submit { ticket: T, query: CatalogQuery },
}

/// Runs catalog queries on a background tokio runtime.
///
/// Queries run concurrently and complete in any order; each completion is
/// reported to the sink together with the ticket it was submitted with.
/// Dropping the handle stops the runtime.
pub struct EngineHandle<T> {
    cmd_tx: mpsc::Sender<EngineCommand<T>>,
}

impl<T: Send + 'static> EngineHandle<T> {
    pub fn new(
        settings: CatalogSettings,
        sink: Arc<dyn EventSink<T>>,
    ) -> Result<Self, CatalogError> {
        let client = SlicingCatalog::new(ReqwestCatalog::new(settings)?);
        Ok(Self::with_client(Arc::new(client), sink))
    }

    pub fn with_client(client: Arc<dyn CatalogClient>, sink: Arc<dyn EventSink<T>>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand<T>>();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    boutique_error!("Failed to start catalog runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Submit { ticket, query } => {
                        let client = client.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            let result = run_query(client.as_ref(), &query).await;
                            sink.emit(EngineEvent { ticket, result });
                        });
                    }
                }
            }
            boutique_debug!("Catalog engine shutting down");
        });

        Self { cmd_tx }
    }

    /// Queues a query. Returns `false` if the engine thread is gone.
    pub fn submit(&self, ticket: T, query: CatalogQuery) -> bool {
        self.cmd_tx
            .send(EngineCommand::Submit { ticket, query })
            .is_ok()
    }
}

pub async fn run_query(
    client: &dyn CatalogClient,
    query: &CatalogQuery,
) -> Result<CatalogPayload, CatalogError> {
    match query {
        CatalogQuery::Page {
            category,
            limit,
            page,
        } => client
            .fetch_page(category, *limit, *page)
            .await
            .map(CatalogPayload::Products),
        CatalogQuery::Categories => client
            .fetch_categories()
            .await
            .map(CatalogPayload::Categories),
        CatalogQuery::Product { product_id } => client
            .fetch_product_by_id(*product_id)
            .await
            .map(CatalogPayload::Product),
    }
}
