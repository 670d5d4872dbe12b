//! Boutique engine: catalog HTTP access and async query execution.
mod catalog;
mod engine;
mod fetch;
mod types;

pub use catalog::{slice_page, CatalogClient, CatalogSource, SlicingCatalog};
pub use engine::{run_query, ChannelEventSink, EngineHandle, EventSink};
pub use fetch::{CatalogSettings, ReqwestCatalog, DEFAULT_BASE_URL};
pub use types::{CatalogError, CatalogErrorKind, CatalogPayload, CatalogQuery, EngineEvent};
