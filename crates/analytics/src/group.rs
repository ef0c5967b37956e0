//! Generic group-by-key-then-sum.
//!
//! Every aggregator (region, product, customer, date) buckets transactions
//! through [`group_by`] and only differs in its key function and the
//! auxiliary [`Tracker`] it carries per group.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{RegionKey, SkipCounts, Transaction};

// ---------------------------------------------------------------------------
// Trackers
// ---------------------------------------------------------------------------

/// Per-group auxiliary state updated once for every grouped transaction.
pub trait Tracker: Default {
    fn track(&mut self, tx: &Transaction);
}

impl Tracker for () {
    fn track(&mut self, _tx: &Transaction) {}
}

/// Distinct non-empty product names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistinctProducts(pub BTreeSet<String>);

impl Tracker for DistinctProducts {
    fn track(&mut self, tx: &Transaction) {
        let name = tx.product_name.trim();
        if !name.is_empty() && !self.0.contains(name) {
            self.0.insert(name.to_string());
        }
    }
}

/// Distinct non-empty customer IDs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistinctCustomers(pub BTreeSet<String>);

impl Tracker for DistinctCustomers {
    fn track(&mut self, tx: &Transaction) {
        let id = tx.customer_id.trim();
        if !id.is_empty() && !self.0.contains(id) {
            self.0.insert(id.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupTotals<A> {
    /// Raw summed amount.
    pub amount: f64,
    /// Saturates at `i64::MAX`.
    pub quantity: i64,
    pub count: usize,
    pub tracked: A,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grouping<K, A> {
    pub groups: BTreeMap<K, GroupTotals<A>>,
    /// Raw sum over every grouped transaction.
    pub grand_total: f64,
    pub skipped: SkipCounts,
}

/// Bucket `txs` by `key_fn`.
///
/// The numeric contract is checked before the key, so a record that is both
/// malformed and keyless counts once, as malformed.
pub fn group_by<K, A, F>(txs: &[Transaction], key_fn: F) -> Grouping<K, A>
where
    K: Ord,
    A: Tracker,
    F: Fn(&Transaction) -> Option<K>,
{
    let mut groups: BTreeMap<K, GroupTotals<A>> = BTreeMap::new();
    let mut grand_total = 0.0;
    let mut skipped = SkipCounts::default();

    for tx in txs {
        let Some((quantity, amount)) = tx.line.contract() else {
            skipped.malformed += 1;
            continue;
        };
        let Some(key) = key_fn(tx) else {
            skipped.missing_key += 1;
            continue;
        };

        let entry = groups.entry(key).or_default();
        entry.amount += amount;
        entry.quantity = entry.quantity.saturating_add(quantity);
        entry.count += 1;
        entry.tracked.track(tx);
        grand_total += amount;
    }

    Grouping {
        groups,
        grand_total,
        skipped,
    }
}

// ---------------------------------------------------------------------------
// Key functions
// ---------------------------------------------------------------------------

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Never `None`: blank regions map to [`RegionKey::Unknown`].
pub fn region_key(tx: &Transaction) -> Option<RegionKey> {
    Some(RegionKey::from_raw(&tx.region))
}

pub fn product_key(tx: &Transaction) -> Option<String> {
    non_blank(&tx.product_name)
}

pub fn customer_key(tx: &Transaction) -> Option<String> {
    non_blank(&tx.customer_id)
}

pub fn date_key(tx: &Transaction) -> Option<String> {
    non_blank(&tx.date)
}
