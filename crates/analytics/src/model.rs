use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Quantity, unit price and the amount derived from them.
///
/// The amount is computed once in [`LineItem::new`] and cached. Fields are
/// private so the cached amount can never drift from its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineItem {
    quantity: Option<i64>,
    unit_price: Option<f64>,
    amount: Option<f64>,
}

impl LineItem {
    pub fn new(quantity: Option<i64>, unit_price: Option<f64>) -> Self {
        let amount = match (quantity, unit_price) {
            (Some(q), Some(p)) => Some(q as f64 * p),
            _ => None,
        };
        Self {
            quantity,
            unit_price,
            amount,
        }
    }

    pub fn quantity(&self) -> Option<i64> {
        self.quantity
    }

    pub fn unit_price(&self) -> Option<f64> {
        self.unit_price
    }

    /// Raw, unrounded `quantity * unit_price` when both are present.
    pub fn amount(&self) -> Option<f64> {
        self.amount
    }

    /// `(quantity, amount)` when the line satisfies the numeric type contract:
    /// quantity present and positive, unit price present and finite.
    ///
    /// Aggregators skip any line for which this returns `None`.
    pub fn contract(&self) -> Option<(i64, f64)> {
        match (self.quantity, self.unit_price, self.amount) {
            (Some(q), Some(p), Some(amount)) if q > 0 && p.is_finite() => Some((q, amount)),
            _ => None,
        }
    }
}

/// A single cleaned sales transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_id: String,
    /// ISO `YYYY-MM-DD`. Compared as a plain string.
    pub date: String,
    pub product_id: String,
    pub product_name: String,
    pub customer_id: String,
    /// May be empty; empty regions group into [`RegionKey::Unknown`].
    pub region: String,
    pub line: LineItem,
}

impl Transaction {
    pub fn quantity(&self) -> Option<i64> {
        self.line.quantity()
    }

    pub fn unit_price(&self) -> Option<f64> {
        self.line.unit_price()
    }

    pub fn amount(&self) -> Option<f64> {
        self.line.amount()
    }
}

// ---------------------------------------------------------------------------
// Grouping keys
// ---------------------------------------------------------------------------

/// Region grouping key. Blank regions are kept as an explicit bucket.
///
/// Derived ordering puts every named region before `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionKey {
    Named(String),
    Unknown,
}

impl RegionKey {
    pub fn from_raw(region: &str) -> Self {
        let trimmed = region.trim();
        if trimmed.is_empty() {
            Self::Unknown
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    /// Display label for tables and reports.
    pub fn label(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Unknown => "(Unknown)",
        }
    }

    /// Value written to flat exports: the region itself, or empty.
    pub fn as_raw(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Unknown => "",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for RegionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RegionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Named(name) => serializer.serialize_str(name),
            Self::Unknown => serializer.serialize_none(),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStat {
    pub region: RegionKey,
    pub total_sales: f64,
    pub transaction_count: usize,
    /// Share of the grand total, 0..=100, rounded to 2 decimals.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductStat {
    pub product_name: String,
    pub total_quantity: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerStat {
    pub customer_id: String,
    pub total_spent: f64,
    pub purchase_count: usize,
    pub avg_order_value: f64,
    /// Distinct product names, ascending.
    pub products_bought: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayStat {
    pub date: String,
    pub revenue: f64,
    pub transaction_count: usize,
    pub unique_customers: usize,
}

/// Highest-revenue day. `Default` is the empty-input sentinel `("", 0.0, 0)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PeakDay {
    pub date: String,
    pub revenue: f64,
    pub transaction_count: usize,
}

impl PeakDay {
    pub fn is_sentinel(&self) -> bool {
        self.date.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionAverage {
    pub region: RegionKey,
    pub average_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub first: String,
    pub last: String,
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.first, self.last)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub total_revenue: f64,
    pub total_transactions: usize,
    pub avg_order_value: f64,
    pub date_range: Option<DateRange>,
}

// ---------------------------------------------------------------------------
// Skipped records
// ---------------------------------------------------------------------------

/// Records a grouping left out, by reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SkipCounts {
    /// Failed the numeric type contract.
    pub malformed: usize,
    /// Key function yielded no key (blank product, customer or date).
    pub missing_key: usize,
}

impl SkipCounts {
    pub fn total(&self) -> usize {
        self.malformed + self.missing_key
    }
}

/// Grouped rows plus what the grouping skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown<T> {
    pub rows: Vec<T>,
    pub skipped: SkipCounts,
}

/// Skip totals surfaced on the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SkippedRecords {
    pub malformed: usize,
    pub missing_product: usize,
    pub missing_customer: usize,
    pub missing_date: usize,
}

impl SkippedRecords {
    pub fn is_empty(&self) -> bool {
        self.malformed == 0
            && self.missing_product == 0
            && self.missing_customer == 0
            && self.missing_date == 0
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub engine_version: String,
    pub records_in: usize,
}

/// Every aggregate of one analytics run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub meta: ReportMeta,
    pub total_revenue: f64,
    pub summary: SummaryMetrics,
    pub regions: Vec<RegionStat>,
    /// All products, by name.
    pub products: Vec<ProductStat>,
    pub top_products: Vec<ProductStat>,
    pub customers: Vec<CustomerStat>,
    pub daily_trend: Vec<DayStat>,
    pub peak_day: PeakDay,
    pub low_threshold: i64,
    pub low_performers: Vec<ProductStat>,
    pub region_averages: Vec<RegionAverage>,
    pub skipped: SkippedRecords,
}
