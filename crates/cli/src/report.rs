//! Composed plain-text sales report.
//!
//! Sections, in order: header, overall summary, region-wise performance,
//! top products, top customers, daily sales trend, product performance
//! analysis, catalog enrichment summary, end marker. Lines carry no trailing
//! whitespace.

use std::path::Path;

use salesgrid_analytics::money::format_currency;
use salesgrid_analytics::rank::top_customers;
use salesgrid_analytics::AnalyticsReport;
use salesgrid_catalog::EnrichmentSummary;
use salesgrid_config::Settings;
use salesgrid_io::IoError;

const RULE_WIDTH: usize = 60;

/// Failed product IDs listed before collapsing into a count.
const FAILED_IDS_SHOWN: usize = 10;

struct Lines {
    out: Vec<String>,
}

impl Lines {
    fn push(&mut self, line: impl AsRef<str>) {
        self.out.push(line.as_ref().trim_end().to_string());
    }

    fn blank(&mut self) {
        self.out.push(String::new());
    }

    fn heavy_rule(&mut self) {
        self.push("=".repeat(RULE_WIDTH));
    }

    fn rule(&mut self) {
        self.push("-".repeat(RULE_WIDTH));
    }

    fn section(&mut self, title: &str) {
        self.push(title);
        self.rule();
    }
}

/// Render the report text. `generated_at` is printed verbatim in the header.
pub fn compose_report(
    report: &AnalyticsReport,
    enrichment: Option<&EnrichmentSummary>,
    settings: &Settings,
    generated_at: &str,
) -> String {
    let money = |v: f64| format_currency(&settings.report.currency_symbol, v);
    let analytics = &settings.analytics;
    let mut l = Lines { out: Vec::new() };

    // Header
    l.heavy_rule();
    l.push("SALES ANALYTICS REPORT");
    l.push(format!("Generated: {generated_at}"));
    l.push(format!("Records Processed: {}", report.meta.records_in));
    l.heavy_rule();
    l.blank();

    // Overall summary
    let summary = &report.summary;
    l.section("OVERALL SUMMARY");
    l.push(format!("Total Revenue: {}", money(summary.total_revenue)));
    l.push(format!("Total Transactions: {}", summary.total_transactions));
    l.push(format!("Average Order Value: {}", money(summary.avg_order_value)));
    match &summary.date_range {
        Some(range) => l.push(format!("Date Range: {range}")),
        None => l.push("Date Range: N/A"),
    }
    l.blank();

    // Regions
    l.section("REGION-WISE PERFORMANCE");
    l.push(format!("{:<20} {:<20} {:<15} {:<15}", "Region", "Sales", "% of Total", "Transactions"));
    l.rule();
    for r in &report.regions {
        l.push(format!(
            "{:<20} {:<20} {:<14.2}% {:<15}",
            r.region.label(),
            money(r.total_sales),
            r.percentage,
            r.transaction_count
        ));
    }
    l.blank();

    // Top products
    l.section(&format!("TOP {} PRODUCTS", analytics.top_products));
    l.push(format!(
        "{:<8} {:<30} {:<15} {:<20}",
        "Rank", "Product Name", "Quantity Sold", "Revenue"
    ));
    l.rule();
    for (rank, p) in report.top_products.iter().enumerate() {
        l.push(format!(
            "{:<8} {:<30} {:<15} {:<20}",
            rank + 1,
            p.product_name,
            p.total_quantity,
            money(p.total_revenue)
        ));
    }
    l.blank();

    // Top customers
    l.section(&format!("TOP {} CUSTOMERS", analytics.top_customers_report));
    l.push(format!(
        "{:<8} {:<20} {:<20} {:<15}",
        "Rank", "Customer ID", "Total Spent", "Order Count"
    ));
    l.rule();
    let customers = top_customers(&report.customers, analytics.top_customers_report);
    for (rank, c) in customers.iter().enumerate() {
        l.push(format!(
            "{:<8} {:<20} {:<20} {:<15}",
            rank + 1,
            c.customer_id,
            money(c.total_spent),
            c.purchase_count
        ));
    }
    l.blank();

    // Daily trend
    l.section("DAILY SALES TREND");
    l.push(format!(
        "{:<15} {:<20} {:<15} {:<20}",
        "Date", "Revenue", "Transactions", "Unique Customers"
    ));
    l.rule();
    let trend_rows = analytics.report_trend_rows;
    for d in report.daily_trend.iter().take(trend_rows) {
        l.push(format!(
            "{:<15} {:<20} {:<15} {:<20}",
            d.date,
            money(d.revenue),
            d.transaction_count,
            d.unique_customers
        ));
    }
    if report.daily_trend.len() > trend_rows {
        l.push(format!("... ({} more days)", report.daily_trend.len() - trend_rows));
    }
    l.blank();

    // Product performance
    l.section("PRODUCT PERFORMANCE ANALYSIS");
    let peak = &report.peak_day;
    l.push(format!(
        "Best Selling Day: {}",
        if peak.is_sentinel() { "N/A" } else { peak.date.as_str() }
    ));
    l.push(format!("  Revenue: {}", money(peak.revenue)));
    l.push(format!("  Transactions: {}", peak.transaction_count));
    l.blank();

    if report.low_performers.is_empty() {
        l.push("Low Performing Products: None");
    } else {
        l.push(format!("Low Performing Products (qty < {}):", report.low_threshold));
        l.push(format!("{:<30} {:<15} {:<20}", "Product Name", "Total Qty", "Total Revenue"));
        l.rule();
        for p in &report.low_performers {
            l.push(format!(
                "{:<30} {:<15} {:<20}",
                p.product_name,
                p.total_quantity,
                money(p.total_revenue)
            ));
        }
    }
    l.blank();

    l.push("Average Transaction Value per Region:");
    l.push(format!("{:<20} {:<20}", "Region", "Average Value"));
    l.rule();
    for avg in &report.region_averages {
        l.push(format!("{:<20} {:<20}", avg.region.label(), money(avg.average_value)));
    }
    l.blank();

    // Enrichment
    l.section("API ENRICHMENT SUMMARY");
    match enrichment {
        None => l.push("Enrichment data not available."),
        Some(e) => {
            l.push(format!("Total Products Enriched: {}", e.total_enriched));
            l.push(format!("Successfully Matched: {}", e.matched));
            l.push(format!("Success Rate: {:.2}%", e.success_rate));
            if e.failed_products.is_empty() {
                l.push("All products successfully enriched!");
            } else {
                l.blank();
                l.push("Products That Couldn't Be Enriched:");
                for id in e.failed_products.iter().take(FAILED_IDS_SHOWN) {
                    l.push(format!("  - {id}"));
                }
                if e.failed_products.len() > FAILED_IDS_SHOWN {
                    let rest = e.failed_products.len() - FAILED_IDS_SHOWN;
                    l.push(format!("  ... and {rest} more"));
                }
            }
        }
    }
    l.blank();

    l.heavy_rule();
    l.push("END OF REPORT");
    l.heavy_rule();

    let mut text = l.out.join("\n");
    text.push('\n');
    text
}

/// Write report text, creating the parent directory.
pub fn save_report(text: &str, path: &Path) -> Result<(), IoError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| IoError::write(parent, e))?;
    }
    std::fs::write(path, text).map_err(|e| IoError::write(path, e))?;
    log::info!("wrote report to {}", path.display());
    Ok(())
}
