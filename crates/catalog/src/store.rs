//! Pipe-delimited enriched file: the cleaned columns followed by
//! `API_Category|API_Brand|API_Rating|API_Match`.
//!
//! `API_Match` is written as `True`/`False`; the reader accepts any case.

use std::io::Write;
use std::path::Path;

use salesgrid_analytics::{LineItem, Transaction};
use salesgrid_io::cleaned::{cleaned_fields, cleaned_header, pipe_reader, pipe_writer};
use salesgrid_io::raw::read_file_as_utf8;
use salesgrid_io::IoError;

use crate::client::CatalogError;
use crate::enrich::EnrichedTransaction;

pub const API_COLUMNS: [&str; 4] = ["API_Category", "API_Brand", "API_Rating", "API_Match"];

pub fn enriched_header() -> Vec<&'static str> {
    let mut header = cleaned_header();
    header.extend(API_COLUMNS);
    header
}

pub fn write_enriched(
    rows: &[EnrichedTransaction],
    writer: impl Write,
) -> Result<(), CatalogError> {
    let mut csv = pipe_writer(writer);
    let csv_err = |e: csv::Error| CatalogError::File(IoError::Csv(format!("write error: {e}")));

    csv.write_record(enriched_header()).map_err(csv_err)?;
    for row in rows {
        let mut fields: Vec<String> = cleaned_fields(&row.transaction).into();
        fields.push(row.api_category.clone().unwrap_or_default());
        fields.push(row.api_brand.clone().unwrap_or_default());
        fields.push(row.api_rating.map(|r| r.to_string()).unwrap_or_default());
        fields.push(if row.api_match { "True" } else { "False" }.to_string());
        csv.write_record(&fields).map_err(csv_err)?;
    }
    csv.flush()
        .map_err(|e| CatalogError::File(IoError::Csv(format!("flush error: {e}"))))?;
    Ok(())
}

/// Write the enriched file, creating its parent directory.
pub fn save_enriched_data(rows: &[EnrichedTransaction], path: &Path) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| IoError::write(parent, e))?;
    }
    let file = std::fs::File::create(path).map_err(|e| IoError::write(path, e))?;
    write_enriched(rows, std::io::BufWriter::new(file))?;
    log::info!("wrote {} enriched rows to {}", rows.len(), path.display());
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse enriched-file text. Columns are located by header name, so files
/// with extra or reordered columns still load.
pub fn parse_enriched(content: &str) -> Result<Vec<EnrichedTransaction>, CatalogError> {
    let mut reader = pipe_reader(content);
    let mut records = reader.records();

    let header: Vec<String> = match records.next() {
        Some(first) => first
            .map_err(|e| IoError::Csv(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect(),
        None => return Ok(Vec::new()),
    };
    let col = |name: &str| header.iter().position(|h| h == name);
    let columns: Vec<Option<usize>> = enriched_header().into_iter().map(col).collect();

    let mut rows = Vec::new();
    for result in records {
        let record = result.map_err(|e| IoError::Csv(e.to_string()))?;
        let field = |i: usize| -> String {
            columns[i]
                .and_then(|c| record.get(c))
                .unwrap_or("")
                .trim()
                .to_string()
        };

        let quantity = field(4).parse::<i64>().ok();
        let unit_price = field(5).parse::<f64>().ok();
        rows.push(EnrichedTransaction {
            transaction: Transaction {
                transaction_id: field(0),
                date: field(1),
                product_id: field(2),
                product_name: field(3),
                customer_id: field(6),
                region: field(7),
                line: LineItem::new(quantity, unit_price),
            },
            api_category: non_empty(&field(9)),
            api_brand: non_empty(&field(10)),
            api_rating: field(11).parse::<f64>().ok(),
            api_match: field(12).eq_ignore_ascii_case("true"),
        });
    }
    Ok(rows)
}

pub fn load_enriched_data(path: &Path) -> Result<Vec<EnrichedTransaction>, CatalogError> {
    let content = read_file_as_utf8(path)?;
    let rows = parse_enriched(&content)?;
    log::info!("{}: {} enriched rows", path.display(), rows.len());
    Ok(rows)
}
