use salesgrid_analytics::aggregate::{customer_analysis, region_wise_sales};
use salesgrid_analytics::model::{LineItem, RegionKey, Transaction};
use salesgrid_analytics::rank::find_peak_sales_day;
use salesgrid_analytics::{analyze, AnalyticsConfig};

fn tx(
    id: &str,
    date: &str,
    product: &str,
    customer: &str,
    region: &str,
    q: i64,
    p: f64,
) -> Transaction {
    Transaction {
        transaction_id: id.into(),
        date: date.into(),
        product_id: "P101".into(),
        product_name: product.into(),
        customer_id: customer.into(),
        region: region.into(),
        line: LineItem::new(Some(q), Some(p)),
    }
}

fn sample_month() -> Vec<Transaction> {
    vec![
        tx("T001", "2024-12-01", "Laptop", "C001", "North", 2, 45000.0),
        tx("T002", "2024-12-01", "Mouse", "C002", "South", 5, 500.0),
        tx("T003", "2024-12-02", "USB Cable", "C001", "North", 3, 150.0),
        tx("T004", "2024-12-02", "Keyboard", "C003", "East", 1, 1500.0),
        tx("T005", "2024-12-03", "Mouse", "C004", "West", 10, 500.0),
        tx("T006", "2024-12-03", "Laptop", "C002", "", 1, 45000.0),
        tx("T007", "2024-12-04", "Webcam", "C005", "North", 2, 2500.0),
    ]
}

// -------------------------------------------------------------------------
// Region scenario
// -------------------------------------------------------------------------

#[test]
fn north_south_split() {
    let txs = vec![
        tx("T1", "2024-01-01", "A", "C1", "North", 2, 10.0),
        tx("T2", "2024-01-01", "B", "C2", "North", 1, 5.0),
        tx("T3", "2024-01-02", "C", "C3", "South", 1, 20.0),
    ];
    let report = analyze(&txs, &AnalyticsConfig::default());

    assert_eq!(report.total_revenue, 45.0);
    assert_eq!(report.regions.len(), 2);

    let north = &report.regions[0];
    assert_eq!(north.region, RegionKey::Named("North".into()));
    assert_eq!((north.total_sales, north.transaction_count, north.percentage), (25.0, 2, 55.56));

    let south = &report.regions[1];
    assert_eq!(south.region, RegionKey::Named("South".into()));
    assert_eq!((south.total_sales, south.transaction_count, south.percentage), (20.0, 1, 44.44));
}

#[test]
fn zero_grand_total_gives_zero_percentages() {
    let txs = vec![
        tx("T1", "2024-01-01", "A", "C1", "North", 1, 0.0),
        tx("T2", "2024-01-01", "B", "C2", "South", 1, 0.0),
    ];
    let regions = region_wise_sales(&txs).rows;
    assert_eq!(regions.len(), 2);
    assert!(regions.iter().all(|r| r.percentage == 0.0));
}

// -------------------------------------------------------------------------
// Selectors
// -------------------------------------------------------------------------

#[test]
fn peak_day_tie_takes_earliest_date() {
    let txs = vec![
        tx("T1", "2024-01-05", "A", "C1", "North", 1, 500.0),
        tx("T2", "2024-01-02", "B", "C2", "North", 1, 500.0),
    ];
    let report = analyze(&txs, &AnalyticsConfig::default());
    assert_eq!(report.peak_day.date, "2024-01-02");
    assert_eq!(report.peak_day.revenue, 500.0);
    assert_eq!(find_peak_sales_day(&report.daily_trend), report.peak_day);
}

#[test]
fn low_performer_threshold_is_strict() {
    let txs = vec![
        tx("T1", "2024-01-01", "Ten", "C1", "North", 10, 1.0),
        tx("T2", "2024-01-01", "Nine", "C1", "North", 9, 1.0),
    ];
    let report = analyze(&txs, &AnalyticsConfig::default());
    let names: Vec<_> = report.low_performers.iter().map(|p| p.product_name.as_str()).collect();
    assert_eq!(names, vec!["Nine"]);
    assert_eq!(report.low_threshold, 10);
}

#[test]
fn customer_average_over_three_purchases() {
    let txs = vec![
        tx("T1", "2024-01-01", "A", "C1", "North", 1, 50.0),
        tx("T2", "2024-01-02", "B", "C1", "North", 1, 60.0),
        tx("T3", "2024-01-03", "A", "C1", "North", 1, 40.0),
    ];
    let customers = customer_analysis(&txs).rows;
    assert_eq!(customers[0].total_spent, 150.0);
    assert_eq!(customers[0].avg_order_value, 50.0);
    assert_eq!(customers[0].products_bought, vec!["A", "B"]);
}

// -------------------------------------------------------------------------
// Full report
// -------------------------------------------------------------------------

#[test]
fn month_report_end_to_end() {
    let config = AnalyticsConfig {
        top_products: 3,
        ..AnalyticsConfig::default()
    };
    let report = analyze(&sample_month(), &config);

    assert_eq!(report.total_revenue, 90000.0 + 2500.0 + 450.0 + 1500.0 + 5000.0 + 45000.0 + 5000.0);
    assert_eq!(report.summary.total_transactions, 7);
    let range = report.summary.date_range.as_ref().unwrap();
    assert_eq!((range.first.as_str(), range.last.as_str()), ("2024-12-01", "2024-12-04"));

    // Unknown region is its own bucket.
    assert!(report.regions.iter().any(|r| r.region.is_unknown()));
    assert_eq!(report.regions[0].region.label(), "North");

    let top: Vec<_> = report
        .top_products
        .iter()
        .map(|p| (p.product_name.as_str(), p.total_quantity))
        .collect();
    assert_eq!(top, vec![("Mouse", 15), ("Laptop", 3), ("USB Cable", 3)]);

    assert_eq!(report.customers[0].customer_id, "C001");
    assert_eq!(report.daily_trend.len(), 4);
    assert_eq!(report.peak_day.date, "2024-12-01");
    assert_eq!(report.region_averages.last().map(|r| r.region.is_unknown()), Some(true));
    assert!(report.skipped.is_empty());
}
