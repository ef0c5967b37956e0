use crate::aggregate::{customer_analysis, daily_sales_trend, product_stats, region_wise_sales};
use crate::config::AnalyticsConfig;
use crate::model::{AnalyticsReport, ReportMeta, SkippedRecords, Transaction};
use crate::rank::{find_peak_sales_day, low_performing_products, top_selling_products};
use crate::summary::{calculate_total_revenue, region_average_transaction, summary_metrics};

/// Compute every aggregate for `txs` in one pass over the config.
///
/// Never fails: malformed or keyless records are skipped and counted in
/// `AnalyticsReport::skipped`.
pub fn analyze(txs: &[Transaction], config: &AnalyticsConfig) -> AnalyticsReport {
    let regions = region_wise_sales(txs);
    let products = product_stats(txs);
    let customers = customer_analysis(txs);
    let daily = daily_sales_trend(txs);

    // Region grouping never lacks a key, so its skips are exactly the malformed records.
    let skipped = SkippedRecords {
        malformed: regions.skipped.malformed,
        missing_product: products.skipped.missing_key,
        missing_customer: customers.skipped.missing_key,
        missing_date: daily.skipped.missing_key,
    };
    if skipped.is_empty() {
        log::debug!("analyze: {} records, none skipped", txs.len());
    } else {
        log::info!(
            "analyze: {} records, skipped {} malformed, {} without product, {} without customer, {} without date",
            txs.len(),
            skipped.malformed,
            skipped.missing_product,
            skipped.missing_customer,
            skipped.missing_date
        );
    }

    let top_products = top_selling_products(&products.rows, config.top_products);
    let low_performers = low_performing_products(&products.rows, config.low_threshold);
    let peak_day = find_peak_sales_day(&daily.rows);

    AnalyticsReport {
        meta: ReportMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            records_in: txs.len(),
        },
        total_revenue: calculate_total_revenue(txs),
        summary: summary_metrics(txs),
        regions: regions.rows,
        products: products.rows,
        top_products,
        customers: customers.rows,
        daily_trend: daily.rows,
        peak_day,
        low_threshold: config.low_threshold,
        low_performers,
        region_averages: region_average_transaction(txs),
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineItem;

    fn tx(id: &str, product: &str, customer: &str, q: Option<i64>) -> Transaction {
        Transaction {
            transaction_id: id.into(),
            date: "2024-12-01".into(),
            product_id: "P101".into(),
            product_name: product.into(),
            customer_id: customer.into(),
            region: "North".into(),
            line: LineItem::new(q, Some(10.0)),
        }
    }

    #[test]
    fn report_collects_skip_reasons() {
        let txs = vec![
            tx("T1", "Mouse", "C1", Some(1)),
            tx("T2", "Mouse", "C1", None),
            tx("T3", "", "C1", Some(1)),
            tx("T4", "Mouse", "", Some(1)),
        ];
        let report = analyze(&txs, &AnalyticsConfig::default());
        assert_eq!(report.meta.records_in, 4);
        assert_eq!(report.skipped.malformed, 1);
        assert_eq!(report.skipped.missing_product, 1);
        assert_eq!(report.skipped.missing_customer, 1);
        assert_eq!(report.skipped.missing_date, 0);
        assert_eq!(report.total_revenue, 30.0);
    }

    #[test]
    fn empty_input_never_fails() {
        let report = analyze(&[], &AnalyticsConfig::default());
        assert_eq!(report.total_revenue, 0.0);
        assert!(report.regions.is_empty());
        assert!(report.top_products.is_empty());
        assert!(report.peak_day.is_sentinel());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn report_serializes_to_json() {
        let txs = vec![tx("T1", "Mouse", "C1", Some(1))];
        let report = analyze(&txs, &AnalyticsConfig::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["regions"][0]["region"], "North");
        assert_eq!(json["peak_day"]["date"], "2024-12-01");
    }
}
