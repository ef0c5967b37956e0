// Property-based tests for the aggregation invariants.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use salesgrid_analytics::aggregate::{customer_analysis, product_stats, region_wise_sales};
use salesgrid_analytics::model::{LineItem, Transaction};
use salesgrid_analytics::rank::{top_customers, top_selling_products};
use salesgrid_analytics::summary::calculate_total_revenue;

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_region() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(vec!["North", "South", "East", "West"]).prop_map(String::from),
        1 => Just(String::new()),
    ]
}

fn arb_quantity() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![
        8 => (1i64..50).prop_map(Some),
        1 => Just(None),
        1 => (-5i64..=0).prop_map(Some),
    ]
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (
        1u32..28,
        prop::sample::select(vec!["Mouse", "Laptop", "Cable", "Webcam", ""]),
        prop::sample::select(vec!["C001", "C002", "C003", "C004"]),
        arb_region(),
        arb_quantity(),
        prop::option::weighted(0.9, 0.01..5000.0f64),
    )
        .prop_map(|(day, product, customer, region, q, p)| Transaction {
            transaction_id: format!("T{day:03}"),
            date: format!("2024-12-{day:02}"),
            product_id: "P101".into(),
            product_name: product.into(),
            customer_id: customer.into(),
            region,
            line: LineItem::new(q, p),
        })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn region_totals_sum_to_revenue(txs in prop::collection::vec(arb_transaction(), 0..60)) {
        let regions = region_wise_sales(&txs).rows;
        let summed: f64 = regions.iter().map(|r| r.total_sales).sum();
        let revenue = calculate_total_revenue(&txs);
        // Each group total is rounded once, so the error is bounded by half a cent per group.
        let tolerance = 0.005 * regions.len() as f64 + 1e-6 * revenue.abs().max(1.0);
        prop_assert!((summed - revenue).abs() <= tolerance,
            "summed {summed} vs revenue {revenue}");
    }
}

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn region_percentages_sum_to_hundred(txs in prop::collection::vec(arb_transaction(), 0..60)) {
        let regions = region_wise_sales(&txs).rows;
        let total: f64 = regions.iter().map(|r| r.percentage).sum();
        if calculate_total_revenue(&txs) > 0.0 {
            prop_assert!((total - 100.0).abs() <= 0.005 * regions.len() as f64 + 1e-9,
                "percentages sum to {total}");
        } else {
            prop_assert!(regions.iter().all(|r| r.percentage == 0.0));
        }
    }
}

proptest! {
    #![proptest_config(config_256())]
    #[test]
    fn top_selection_is_idempotent(
        txs in prop::collection::vec(arb_transaction(), 0..60),
        n in 0usize..8,
    ) {
        let products = product_stats(&txs).rows;
        let once = top_selling_products(&products, n);
        prop_assert_eq!(&top_selling_products(&once, n), &once);
        prop_assert!(once.len() <= n);

        let customers = customer_analysis(&txs).rows;
        let top = top_customers(&customers, n);
        prop_assert_eq!(&top_customers(&top, n), &top);
    }
}
