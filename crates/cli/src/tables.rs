// Console tables for `salesgrid analyze` and `salesgrid run`.
// Each renderer returns the full table text, newline-terminated.

use salesgrid_analytics::money::format_money;
use salesgrid_analytics::rank::top_customers;
use salesgrid_analytics::{CustomerStat, DayStat, PeakDay, ProductStat, RegionStat};

use crate::util::{column_width, display_width, pad_left, pad_right, truncate_display};

/// Widest the products column of the customer table may grow.
const PRODUCTS_COLUMN_MAX: usize = 60;

fn push_header(out: &mut String, header: &str) {
    let header = header.trim_end();
    out.push_str(header);
    out.push('\n');
    out.push_str(&"-".repeat(display_width(header)));
    out.push('\n');
}

fn push_row(out: &mut String, row: String) {
    out.push_str(row.trim_end());
    out.push('\n');
}

pub fn region_table(regions: &[RegionStat]) -> String {
    let width = column_width("Region".len(), regions.iter().map(|r| r.region.label()));
    let mut out = String::new();
    push_header(
        &mut out,
        &format!(
            "{}  {:>15}  {:>10}  {:>8}",
            pad_right("Region", width),
            "Total Sales",
            "Txn Count",
            "% Share"
        ),
    );
    for r in regions {
        push_row(
            &mut out,
            format!(
                "{}  {:>15}  {:>10}  {:>8.2}",
                pad_right(r.region.label(), width),
                format_money(r.total_sales),
                r.transaction_count,
                r.percentage
            ),
        );
    }
    out
}

pub fn product_table(products: &[ProductStat]) -> String {
    let width = column_width("Product".len(), products.iter().map(|p| p.product_name.as_str()));
    let mut out = String::new();
    push_header(
        &mut out,
        &format!("{}  {:>10}  {:>15}", pad_right("Product", width), "Total Qty", "Total Revenue"),
    );
    for p in products {
        push_row(
            &mut out,
            format!(
                "{}  {:>10}  {:>15}",
                pad_right(&p.product_name, width),
                p.total_quantity,
                format_money(p.total_revenue)
            ),
        );
    }
    out
}

/// Top `limit` customers by spend.
pub fn customer_table(customers: &[CustomerStat], limit: usize) -> String {
    let shown = top_customers(customers, limit);
    let width = column_width("CustomerID".len(), shown.iter().map(|c| c.customer_id.as_str()));
    let mut out = String::new();
    push_header(
        &mut out,
        &format!(
            "{}  {:>15}  {:>10}  {:>12}  Products",
            pad_right("CustomerID", width),
            "Total Spent",
            "Purchases",
            "Avg Order"
        ),
    );
    for c in &shown {
        let products = c.products_bought.join(", ");
        push_row(
            &mut out,
            format!(
                "{}  {:>15}  {:>10}  {:>12}  {}",
                pad_right(&c.customer_id, width),
                format_money(c.total_spent),
                c.purchase_count,
                format_money(c.avg_order_value),
                truncate_display(&products, PRODUCTS_COLUMN_MAX)
            ),
        );
    }
    out
}

/// Days in date order. With `max_rows`, later days collapse into a count line.
pub fn daily_trend_table(days: &[DayStat], max_rows: Option<usize>) -> String {
    let mut out = String::new();
    push_header(
        &mut out,
        &format!("{:<12}  {:>15}  {:>10}  {:>12}", "Date", "Revenue", "Txn Count", "Unique Cust"),
    );
    let shown = max_rows.unwrap_or(days.len()).min(days.len());
    for d in &days[..shown] {
        push_row(
            &mut out,
            format!(
                "{}  {}  {:>10}  {:>12}",
                pad_right(&d.date, 12),
                pad_left(&format_money(d.revenue), 15),
                d.transaction_count,
                d.unique_customers
            ),
        );
    }
    if days.len() > shown {
        push_row(&mut out, format!("... ({} more days)", days.len() - shown));
    }
    out
}

pub fn peak_day_line(peak: &PeakDay) -> String {
    if peak.is_sentinel() {
        return "No sales days recorded.".to_string();
    }
    format!(
        "{} | Revenue: {} | Transactions: {}",
        peak.date,
        format_money(peak.revenue),
        peak.transaction_count
    )
}
