use std::cmp::Ordering;

use crate::group::{
    customer_key, date_key, group_by, product_key, region_key, DistinctCustomers,
    DistinctProducts, Grouping,
};
use crate::model::{
    Breakdown, CustomerStat, DayStat, ProductStat, RegionKey, RegionStat, Transaction,
};
use crate::money::{average, percentage, round2};

/// Descending by value, NaN-safe.
pub(crate) fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Sales per region with their share of the grand total.
///
/// Sorted by rounded total descending, then region ascending with the
/// unknown bucket last.
pub fn region_wise_sales(txs: &[Transaction]) -> Breakdown<RegionStat> {
    let Grouping {
        groups,
        grand_total,
        skipped,
    } = group_by::<RegionKey, (), _>(txs, region_key);

    let mut rows: Vec<RegionStat> = groups
        .into_iter()
        .map(|(region, totals)| RegionStat {
            region,
            total_sales: round2(totals.amount),
            transaction_count: totals.count,
            percentage: percentage(totals.amount, grand_total),
        })
        .collect();

    rows.sort_by(|a, b| desc(a.total_sales, b.total_sales).then_with(|| a.region.cmp(&b.region)));

    log::debug!("region_wise_sales: {} regions, {} skipped", rows.len(), skipped.total());
    Breakdown { rows, skipped }
}

/// Quantity and revenue per product name, ordered by name.
///
/// The rank selectors re-sort this as they need.
pub fn product_stats(txs: &[Transaction]) -> Breakdown<ProductStat> {
    let grouping = group_by::<String, (), _>(txs, product_key);

    let rows = grouping
        .groups
        .into_iter()
        .map(|(product_name, totals)| ProductStat {
            product_name,
            total_quantity: totals.quantity,
            total_revenue: round2(totals.amount),
        })
        .collect();

    Breakdown {
        rows,
        skipped: grouping.skipped,
    }
}

/// Spend per customer, sorted by rounded total spent descending, then
/// customer ID ascending.
pub fn customer_analysis(txs: &[Transaction]) -> Breakdown<CustomerStat> {
    let grouping = group_by::<String, DistinctProducts, _>(txs, customer_key);

    let mut rows: Vec<CustomerStat> = grouping
        .groups
        .into_iter()
        .map(|(customer_id, totals)| CustomerStat {
            customer_id,
            total_spent: round2(totals.amount),
            purchase_count: totals.count,
            avg_order_value: average(totals.amount, totals.count),
            products_bought: totals.tracked.0.into_iter().collect(),
        })
        .collect();

    rows.sort_by(|a, b| {
        desc(a.total_spent, b.total_spent).then_with(|| a.customer_id.cmp(&b.customer_id))
    });

    Breakdown {
        rows,
        skipped: grouping.skipped,
    }
}

/// Revenue, transaction count and distinct customers per date, ascending.
pub fn daily_sales_trend(txs: &[Transaction]) -> Breakdown<DayStat> {
    let grouping = group_by::<String, DistinctCustomers, _>(txs, date_key);

    // BTreeMap iteration is already ascending by date string.
    let rows = grouping
        .groups
        .into_iter()
        .map(|(date, totals)| DayStat {
            date,
            revenue: round2(totals.amount),
            transaction_count: totals.count,
            unique_customers: totals.tracked.0.len(),
        })
        .collect();

    Breakdown {
        rows,
        skipped: grouping.skipped,
    }
}
