use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use salesgrid_analytics::money::percentage;
use salesgrid_analytics::Transaction;
use serde::Serialize;

use crate::client::CatalogProduct;

/// Catalog attributes joined onto a transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogInfo {
    pub title: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub rating: Option<f64>,
    pub price: Option<f64>,
}

pub type ProductMapping = BTreeMap<u64, CatalogInfo>;

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTransaction {
    pub transaction: Transaction,
    pub api_category: Option<String>,
    pub api_brand: Option<String>,
    pub api_rating: Option<f64>,
    pub api_match: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnrichmentSummary {
    pub total_enriched: usize,
    pub matched: usize,
    /// Percent matched, 2 decimals. Zero for no rows.
    pub success_rate: f64,
    /// Product IDs of unmatched rows, in row order.
    pub failed_products: Vec<String>,
}

/// Key products by numeric id. Id `0` is not a usable key and is dropped.
pub fn create_product_mapping(products: &[CatalogProduct]) -> ProductMapping {
    let mapping: ProductMapping = products
        .iter()
        .filter(|p| p.id != 0)
        .map(|p| {
            (
                p.id,
                CatalogInfo {
                    title: p.title.clone(),
                    category: p.category.clone(),
                    brand: p.brand.clone(),
                    rating: p.rating,
                    price: p.price,
                },
            )
        })
        .collect();
    log::debug!("product mapping has {} entries", mapping.len());
    mapping
}

fn product_id_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"P(\d+)").ok()).as_ref()
}

/// Numeric part of a product ID: `"P101"` → `101`, `"p5"` → `5`.
pub fn extract_product_id(product_id: &str) -> Option<u64> {
    let upper = product_id.to_uppercase();
    let caps = product_id_pattern()?.captures(&upper)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Join every transaction to the catalog by its numeric product ID.
pub fn enrich_sales_data(
    transactions: &[Transaction],
    mapping: &ProductMapping,
) -> Vec<EnrichedTransaction> {
    let enriched: Vec<EnrichedTransaction> = transactions
        .iter()
        .map(|tx| {
            let info = extract_product_id(&tx.product_id)
                .filter(|id| *id != 0)
                .and_then(|id| mapping.get(&id));
            match info {
                Some(info) => {
                    log::debug!("matched {} to catalog", tx.product_id);
                    EnrichedTransaction {
                        transaction: tx.clone(),
                        api_category: info.category.clone(),
                        api_brand: info.brand.clone(),
                        api_rating: info.rating,
                        api_match: true,
                    }
                }
                None => {
                    log::debug!("no catalog match for {}", tx.product_id);
                    EnrichedTransaction {
                        transaction: tx.clone(),
                        api_category: None,
                        api_brand: None,
                        api_rating: None,
                        api_match: false,
                    }
                }
            }
        })
        .collect();
    log::info!(
        "enriched {} transactions, {} matched",
        enriched.len(),
        enriched.iter().filter(|e| e.api_match).count()
    );
    enriched
}

pub fn summarize_enrichment(enriched: &[EnrichedTransaction]) -> EnrichmentSummary {
    let total = enriched.len();
    let matched = enriched.iter().filter(|e| e.api_match).count();
    EnrichmentSummary {
        total_enriched: total,
        matched,
        success_rate: percentage(matched as f64, total as f64),
        failed_products: enriched
            .iter()
            .filter(|e| !e.api_match)
            .map(|e| e.transaction.product_id.clone())
            .collect(),
    }
}
