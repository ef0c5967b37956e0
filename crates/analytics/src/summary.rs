use crate::group::{group_by, region_key};
use crate::model::{DateRange, RegionAverage, RegionKey, SummaryMetrics, Transaction};
use crate::money::{average, round2};

/// Raw, unrounded sum of amounts over records meeting the numeric contract.
pub fn calculate_total_revenue(txs: &[Transaction]) -> f64 {
    txs.iter()
        .filter_map(|tx| tx.line.contract())
        .map(|(_, amount)| amount)
        .sum()
}

/// Headline figures for the report summary section.
pub fn summary_metrics(txs: &[Transaction]) -> SummaryMetrics {
    let counted = txs.iter().filter(|tx| tx.line.contract().is_some()).count();
    let total = calculate_total_revenue(txs);

    let mut dates = txs
        .iter()
        .filter(|tx| tx.line.contract().is_some())
        .map(|tx| tx.date.trim())
        .filter(|d| !d.is_empty());
    let date_range = dates.next().map(|first| {
        let (lo, hi) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        DateRange {
            first: lo.to_string(),
            last: hi.to_string(),
        }
    });

    SummaryMetrics {
        total_revenue: round2(total),
        total_transactions: counted,
        avg_order_value: average(total, counted),
        date_range,
    }
}

/// Mean transaction amount per region, region ascending.
pub fn region_average_transaction(txs: &[Transaction]) -> Vec<RegionAverage> {
    group_by::<RegionKey, (), _>(txs, region_key)
        .groups
        .into_iter()
        .map(|(region, totals)| RegionAverage {
            region,
            average_value: average(totals.amount, totals.count),
        })
        .collect()
}
