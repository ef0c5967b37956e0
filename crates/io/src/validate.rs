use std::collections::BTreeSet;

use salesgrid_analytics::Transaction;

/// Optional user filters applied after validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Case-insensitive region match.
    pub region: Option<String>,
    /// Keep amounts `>=` this.
    pub min_amount: Option<f64>,
    /// Keep amounts `<=` this.
    pub max_amount: Option<f64>,
}

impl FilterOptions {
    pub fn is_empty(&self) -> bool {
        self.region.is_none() && self.min_amount.is_none() && self.max_amount.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub total_input: usize,
    pub invalid: usize,
    pub filtered_by_region: usize,
    pub filtered_by_amount: usize,
    pub final_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    /// Valid transactions that passed every filter.
    pub valid: Vec<Transaction>,
    pub summary: FilterSummary,
    /// Distinct non-empty regions among valid transactions, before filtering.
    pub available_regions: Vec<String>,
    /// `(min, max)` amount among valid transactions, before filtering.
    pub amount_range: Option<(f64, f64)>,
}

/// Why a transaction was rejected. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalid {
    MissingField,
    NonPositiveQuantity,
    NonPositivePrice,
    BadTransactionId,
    BadProductId,
    BadCustomerId,
}

/// First rule `tx` breaks, if any.
pub fn check_transaction(tx: &Transaction) -> Result<(), Invalid> {
    let text_fields = [
        &tx.transaction_id,
        &tx.date,
        &tx.product_id,
        &tx.product_name,
        &tx.customer_id,
        &tx.region,
    ];
    if text_fields.iter().any(|f| f.is_empty()) {
        return Err(Invalid::MissingField);
    }
    match tx.quantity() {
        None => return Err(Invalid::MissingField),
        Some(q) if q <= 0 => return Err(Invalid::NonPositiveQuantity),
        Some(_) => {}
    }
    match tx.unit_price() {
        None => return Err(Invalid::MissingField),
        Some(p) if !(p > 0.0) => return Err(Invalid::NonPositivePrice),
        Some(_) => {}
    }
    if !tx.transaction_id.starts_with('T') {
        return Err(Invalid::BadTransactionId);
    }
    if !tx.product_id.starts_with('P') {
        return Err(Invalid::BadProductId);
    }
    if !tx.customer_id.starts_with('C') {
        return Err(Invalid::BadCustomerId);
    }
    Ok(())
}

/// Drop invalid transactions, then apply region and amount filters in that order.
pub fn validate_and_filter(
    transactions: Vec<Transaction>,
    filters: &FilterOptions,
) -> ValidationOutcome {
    let total_input = transactions.len();
    let mut invalid = 0usize;
    let mut valid = Vec::with_capacity(total_input);
    for tx in transactions {
        match check_transaction(&tx) {
            Ok(()) => valid.push(tx),
            Err(reason) => {
                log::debug!("invalid transaction {} ({reason:?})", tx.transaction_id);
                invalid += 1;
            }
        }
    }

    let available_regions: Vec<String> = valid
        .iter()
        .filter(|tx| !tx.region.is_empty())
        .map(|tx| tx.region.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let amount_range = valid
        .iter()
        .filter_map(Transaction::amount)
        .fold(None, |acc, amount| match acc {
            None => Some((amount, amount)),
            Some((lo, hi)) => Some((f64::min(lo, amount), f64::max(hi, amount))),
        });

    let mut filtered = valid;
    let mut filtered_by_region = 0;
    let mut filtered_by_amount = 0;

    if let Some(region) = filters.region.as_deref() {
        let before = filtered.len();
        let wanted = region.to_lowercase();
        filtered.retain(|tx| tx.region.to_lowercase() == wanted);
        filtered_by_region = before - filtered.len();
        log::info!(
            "region filter '{region}': {} kept, {filtered_by_region} removed",
            filtered.len()
        );
    }
    if let Some(min) = filters.min_amount {
        let before = filtered.len();
        filtered.retain(|tx| tx.amount().is_some_and(|a| a >= min));
        filtered_by_amount += before - filtered.len();
        log::info!("min amount {min}: {} kept", filtered.len());
    }
    if let Some(max) = filters.max_amount {
        let before = filtered.len();
        filtered.retain(|tx| tx.amount().is_some_and(|a| a <= max));
        filtered_by_amount += before - filtered.len();
        log::info!("max amount {max}: {} kept", filtered.len());
    }

    let summary = FilterSummary {
        total_input,
        invalid,
        filtered_by_region,
        filtered_by_amount,
        final_count: filtered.len(),
    };

    ValidationOutcome {
        valid: filtered,
        summary,
        available_regions,
        amount_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesgrid_analytics::LineItem;

    fn tx(id: &str, product_id: &str, customer: &str, region: &str, q: i64, p: f64) -> Transaction {
        Transaction {
            transaction_id: id.into(),
            date: "2024-12-01".into(),
            product_id: product_id.into(),
            product_name: "Mouse".into(),
            customer_id: customer.into(),
            region: region.into(),
            line: LineItem::new(Some(q), Some(p)),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("T001", "P101", "C001", "North", 2, 100.0),
            tx("T002", "P102", "C002", "south", 1, 50.0),
            tx("T003", "P103", "C003", "South", 10, 100.0),
            tx("X004", "P104", "C004", "North", 1, 10.0),
            tx("T005", "P105", "C005", "North", 0, 10.0),
            tx("T006", "P106", "C006", "", 1, 10.0),
            tx("T007", "Q107", "C007", "East", 1, 10.0),
            tx("T008", "P108", "D008", "East", 1, 10.0),
            tx("T009", "P109", "C009", "East", 1, -1.0),
        ]
    }

    #[test]
    fn rules_in_order() {
        assert_eq!(check_transaction(&tx("T1", "P1", "C1", "N", 1, 1.0)), Ok(()));
        assert_eq!(
            check_transaction(&tx("X1", "P1", "C1", "N", 1, 1.0)),
            Err(Invalid::BadTransactionId)
        );
        assert_eq!(
            check_transaction(&tx("T1", "P1", "C1", "", 1, 1.0)),
            Err(Invalid::MissingField)
        );
        assert_eq!(
            check_transaction(&tx("T1", "P1", "C1", "N", -1, 1.0)),
            Err(Invalid::NonPositiveQuantity)
        );
        assert_eq!(
            check_transaction(&tx("T1", "P1", "C1", "N", 1, 0.0)),
            Err(Invalid::NonPositivePrice)
        );
        assert_eq!(
            check_transaction(&tx("T1", "A1", "C1", "N", 1, 1.0)),
            Err(Invalid::BadProductId)
        );
        assert_eq!(
            check_transaction(&tx("T1", "P1", "B1", "N", 1, 1.0)),
            Err(Invalid::BadCustomerId)
        );
    }

    #[test]
    fn no_filters_counts_invalid() {
        let outcome = validate_and_filter(sample(), &FilterOptions::default());
        assert_eq!(outcome.summary.total_input, 9);
        assert_eq!(outcome.summary.invalid, 6);
        assert_eq!(outcome.summary.final_count, 3);
        assert_eq!(outcome.available_regions, vec!["North", "South", "south"]);
        assert_eq!(outcome.amount_range, Some((50.0, 1000.0)));
    }

    #[test]
    fn region_filter_is_case_insensitive() {
        let filters = FilterOptions {
            region: Some("SOUTH".into()),
            ..FilterOptions::default()
        };
        let outcome = validate_and_filter(sample(), &filters);
        assert_eq!(outcome.summary.final_count, 2);
        assert_eq!(outcome.summary.filtered_by_region, 1);
    }

    #[test]
    fn amount_bounds_are_inclusive() {
        let filters = FilterOptions {
            region: None,
            min_amount: Some(50.0),
            max_amount: Some(200.0),
        };
        let outcome = validate_and_filter(sample(), &filters);
        let ids: Vec<_> = outcome.valid.iter().map(|t| t.transaction_id.as_str()).collect();
        assert_eq!(ids, vec!["T001", "T002"]);
        assert_eq!(outcome.summary.filtered_by_amount, 1);
        assert_eq!(outcome.amount_range, Some((50.0, 1000.0)));
    }

    #[test]
    fn empty_input() {
        let outcome = validate_and_filter(Vec::new(), &FilterOptions::default());
        assert_eq!(outcome.summary, FilterSummary::default());
        assert!(outcome.amount_range.is_none());
        assert!(outcome.available_regions.is_empty());
    }
}
