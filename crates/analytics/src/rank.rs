//! Top-N, threshold and peak selectors over already-aggregated rows.
//!
//! Every selector sorts with a total comparator, so the output does not
//! depend on input order and re-selecting a selection returns it unchanged.

use crate::aggregate::desc;
use crate::model::{CustomerStat, DayStat, PeakDay, ProductStat};

/// `n` products with the highest total quantity, ties by name ascending.
pub fn top_selling_products(products: &[ProductStat], n: usize) -> Vec<ProductStat> {
    let mut ranked = products.to_vec();
    ranked.sort_by(|a, b| {
        b.total_quantity
            .cmp(&a.total_quantity)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });
    ranked.truncate(n);
    ranked
}

/// Products whose total quantity is strictly below `threshold`,
/// quantity ascending then name ascending.
pub fn low_performing_products(products: &[ProductStat], threshold: i64) -> Vec<ProductStat> {
    let mut low: Vec<ProductStat> = products
        .iter()
        .filter(|p| p.total_quantity < threshold)
        .cloned()
        .collect();
    low.sort_by(|a, b| {
        a.total_quantity
            .cmp(&b.total_quantity)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });
    low
}

/// `n` customers with the highest spend, ties by customer ID ascending.
pub fn top_customers(customers: &[CustomerStat], n: usize) -> Vec<CustomerStat> {
    let mut ranked = customers.to_vec();
    ranked.sort_by(|a, b| {
        desc(a.total_spent, b.total_spent).then_with(|| a.customer_id.cmp(&b.customer_id))
    });
    ranked.truncate(n);
    ranked
}

/// Day with the highest rounded revenue; ties go to the earliest date.
/// Returns the `("", 0.0, 0)` sentinel for an empty trend.
pub fn find_peak_sales_day(trend: &[DayStat]) -> PeakDay {
    trend
        .iter()
        .min_by(|a, b| desc(a.revenue, b.revenue).then_with(|| a.date.cmp(&b.date)))
        .map(|day| PeakDay {
            date: day.date.clone(),
            revenue: day.revenue,
            transaction_count: day.transaction_count,
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, qty: i64) -> ProductStat {
        ProductStat {
            product_name: name.into(),
            total_quantity: qty,
            total_revenue: qty as f64 * 10.0,
        }
    }

    fn day(date: &str, revenue: f64) -> DayStat {
        DayStat {
            date: date.into(),
            revenue,
            transaction_count: 1,
            unique_customers: 1,
        }
    }

    #[test]
    fn top_products_ties_by_name() {
        let products = vec![
            product("Zeta", 5),
            product("Alpha", 5),
            product("Mid", 9),
            product("Low", 1),
        ];
        let top = top_selling_products(&products, 3);
        let names: Vec<_> = top.iter().map(|p| p.product_name.as_str()).collect();
        assert_eq!(names, vec!["Mid", "Alpha", "Zeta"]);
    }

    #[test]
    fn top_n_is_idempotent() {
        let products = vec![product("A", 3), product("B", 7), product("C", 7), product("D", 1)];
        let once = top_selling_products(&products, 2);
        let twice = top_selling_products(&once, 2);
        assert_eq!(once, twice);
    }

    #[test]
    fn top_n_larger_than_input() {
        let products = vec![product("A", 3)];
        assert_eq!(top_selling_products(&products, 5).len(), 1);
        assert!(top_selling_products(&[], 5).is_empty());
    }

    #[test]
    fn low_threshold_is_strict() {
        let products = vec![
            product("Ten", 10),
            product("Nine", 9),
            product("Two", 2),
            product("Also2", 2),
        ];
        let low = low_performing_products(&products, 10);
        let names: Vec<_> = low.iter().map(|p| p.product_name.as_str()).collect();
        assert_eq!(names, vec!["Also2", "Two", "Nine"]);
    }

    #[test]
    fn peak_day_tie_goes_to_earliest() {
        let trend = vec![
            day("2024-01-05", 500.0),
            day("2024-01-02", 500.0),
            day("2024-01-03", 100.0),
        ];
        let peak = find_peak_sales_day(&trend);
        assert_eq!(peak.date, "2024-01-02");
        assert_eq!(peak.revenue, 500.0);
        assert_eq!(peak.transaction_count, 1);
    }

    #[test]
    fn peak_day_empty_is_sentinel() {
        let peak = find_peak_sales_day(&[]);
        assert_eq!(peak, PeakDay::default());
    }

    #[test]
    fn top_customers_ties_by_id() {
        let customers = vec![
            CustomerStat {
                customer_id: "C2".into(),
                total_spent: 100.0,
                purchase_count: 1,
                avg_order_value: 100.0,
                products_bought: vec![],
            },
            CustomerStat {
                customer_id: "C1".into(),
                total_spent: 100.0,
                purchase_count: 2,
                avg_order_value: 50.0,
                products_bought: vec![],
            },
        ];
        let top = top_customers(&customers, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].customer_id, "C1");
    }
}
