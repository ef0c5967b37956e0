//! Pipe-delimited cleaned transaction file.
//!
//! ```text
//! TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region|Amount
//! T001|2024-12-01|P101|Laptop|2|45000.00|C001|North|90000.00
//! ```
//!
//! The `Amount` column is informational. The loader recomputes the amount
//! from quantity and unit price.

use std::io::Write;
use std::path::Path;

use salesgrid_analytics::{LineItem, Transaction};

use crate::error::IoError;
use crate::raw::read_file_as_utf8;
use crate::RECORD_FIELDS;

pub const AMOUNT_COLUMN: &str = "Amount";

pub fn pipe_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'|')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}

pub fn pipe_reader(content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes())
}

/// The nine cleaned columns of `tx`, numbers formatted with 2 decimals.
pub fn cleaned_fields(tx: &Transaction) -> [String; 9] {
    let opt_num = |v: Option<f64>| v.map(|v| format!("{v:.2}")).unwrap_or_default();
    [
        tx.transaction_id.clone(),
        tx.date.clone(),
        tx.product_id.clone(),
        tx.product_name.clone(),
        tx.quantity().map(|q| q.to_string()).unwrap_or_default(),
        opt_num(tx.unit_price()),
        tx.customer_id.clone(),
        tx.region.clone(),
        opt_num(tx.amount()),
    ]
}

pub fn cleaned_header() -> Vec<&'static str> {
    let mut header = RECORD_FIELDS.to_vec();
    header.push(AMOUNT_COLUMN);
    header
}

pub fn write_cleaned(transactions: &[Transaction], writer: impl Write) -> Result<(), IoError> {
    let mut csv = pipe_writer(writer);
    csv.write_record(cleaned_header())
        .map_err(|e| IoError::Csv(format!("write error: {e}")))?;
    for tx in transactions {
        csv.write_record(cleaned_fields(tx))
            .map_err(|e| IoError::Csv(format!("write error: {e}")))?;
    }
    csv.flush().map_err(|e| IoError::Csv(format!("flush error: {e}")))?;
    Ok(())
}

/// Write the cleaned file, creating its parent directory.
pub fn save_cleaned_data(transactions: &[Transaction], path: &Path) -> Result<(), IoError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| IoError::write(parent, e))?;
    }
    let file = std::fs::File::create(path).map_err(|e| IoError::write(path, e))?;
    write_cleaned(transactions, std::io::BufWriter::new(file))?;
    log::info!("wrote {} cleaned transactions to {}", transactions.len(), path.display());
    Ok(())
}

/// `"10"` or `"10.0"`; fractional values truncate toward zero.
fn parse_quantity(field: &str) -> Option<i64> {
    let field = field.trim();
    field.parse::<i64>().ok().or_else(|| {
        field
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
            .map(|f| f.trunc() as i64)
    })
}

/// Parse cleaned-file text. Rows with fewer than 8 fields are skipped;
/// unparseable numbers become `None` so analytics can count them.
pub fn parse_cleaned(content: &str) -> Result<Vec<Transaction>, IoError> {
    let mut reader = pipe_reader(content);
    let mut transactions = Vec::new();
    let mut short_rows = 0usize;

    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| IoError::Csv(e.to_string()))?;
        if idx == 0 && record.iter().any(|f| f.contains("TransactionID")) {
            continue;
        }
        if record.len() < 8 {
            short_rows += 1;
            continue;
        }
        let field = |i: usize| record.get(i).unwrap_or("").trim().to_string();
        let quantity = parse_quantity(&field(4));
        let unit_price = field(5).parse::<f64>().ok();

        transactions.push(Transaction {
            transaction_id: field(0),
            date: field(1),
            product_id: field(2),
            product_name: field(3),
            customer_id: field(6),
            region: field(7),
            line: LineItem::new(quantity, unit_price),
        });
    }

    if short_rows > 0 {
        log::warn!("skipped {short_rows} cleaned rows with fewer than 8 fields");
    }
    Ok(transactions)
}

pub fn load_cleaned_transactions(path: &Path) -> Result<Vec<Transaction>, IoError> {
    let content = read_file_as_utf8(path)?;
    let transactions = parse_cleaned(&content)?;
    log::info!("{}: {} cleaned transactions", path.display(), transactions.len());
    Ok(transactions)
}
