//! `salesgrid-io`: everything that touches sales files on disk.
//!
//! - [`raw`]: decode a raw sales file and split it into 8-field records
//! - [`parse`]: clean raw records into transactions
//! - [`validate`]: reject invalid transactions and apply user filters
//! - [`cleaned`]: write/read the pipe-delimited cleaned file
//! - [`export`]: comma-delimited summaries of an analytics run

pub mod cleaned;
pub mod error;
pub mod export;
pub mod parse;
pub mod raw;
pub mod validate;

pub use error::IoError;
pub use raw::RawRecord;
pub use validate::{FilterOptions, FilterSummary, ValidationOutcome};

/// Columns of a raw sales record, in file order.
pub const RECORD_FIELDS: [&str; 8] = [
    "TransactionID",
    "Date",
    "ProductID",
    "ProductName",
    "Quantity",
    "UnitPrice",
    "CustomerID",
    "Region",
];
