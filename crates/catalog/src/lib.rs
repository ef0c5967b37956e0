//! Product catalog client and enrichment join.
//!
//! Fetches the remote catalog over blocking HTTP, keys it by numeric product
//! id and joins it onto cleaned transactions. No retries, no caching.

mod client;
pub mod enrich;
pub mod store;

pub use client::{CatalogClient, CatalogError, CatalogProduct};
pub use enrich::{
    create_product_mapping, enrich_sales_data, extract_product_id, summarize_enrichment,
    CatalogInfo, EnrichedTransaction, EnrichmentSummary, ProductMapping,
};
pub use store::{load_enriched_data, save_enriched_data};
