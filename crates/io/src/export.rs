//! Comma-delimited summaries of an analytics run.
//!
//! One file per aggregate, fixed headers, monetary values with 2 decimals.
//! The destination directory is always passed in by the caller.

use std::io::Write;
use std::path::{Path, PathBuf};

use salesgrid_analytics::{AnalyticsReport, CustomerStat, DayStat, ProductStat, RegionStat};

use crate::error::IoError;

pub const REGION_FILE: &str = "region_sales_summary.csv";
pub const TOP_PRODUCTS_FILE: &str = "top_products_summary.csv";
pub const CUSTOMER_FILE: &str = "customer_summary.csv";
pub const DAILY_TREND_FILE: &str = "daily_trend_summary.csv";
pub const LOW_PRODUCTS_FILE: &str = "low_performing_products.csv";

pub const REGION_HEADER: &[&str] = &["Region", "Total Sales", "Transaction Count", "Percentage"];
pub const PRODUCT_HEADER: &[&str] = &["ProductName", "TotalQuantity", "TotalRevenue"];
pub const CUSTOMER_HEADER: &[&str] = &[
    "CustomerID",
    "TotalSpent",
    "PurchaseCount",
    "AvgOrderValue",
    "ProductsBought",
];
pub const DAILY_TREND_HEADER: &[&str] = &["Date", "Revenue", "TransactionCount", "UniqueCustomers"];

fn money(v: f64) -> String {
    format!("{v:.2}")
}

/// Shared writer: header, then one row per item.
fn write_rows<T, W, F, const N: usize>(
    header: &[&str],
    rows: &[T],
    writer: W,
    to_row: F,
) -> Result<(), IoError>
where
    W: Write,
    F: Fn(&T) -> [String; N],
{
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(header)
        .map_err(|e| IoError::Csv(format!("write error: {e}")))?;
    for row in rows {
        csv.write_record(to_row(row))
            .map_err(|e| IoError::Csv(format!("write error: {e}")))?;
    }
    csv.flush().map_err(|e| IoError::Csv(format!("flush error: {e}")))?;
    Ok(())
}

pub fn write_region_csv(regions: &[RegionStat], writer: impl Write) -> Result<(), IoError> {
    write_rows(REGION_HEADER, regions, writer, |r| {
        [
            r.region.as_raw().to_string(),
            money(r.total_sales),
            r.transaction_count.to_string(),
            money(r.percentage),
        ]
    })
}

/// Used for both the top-products and the low-performers file.
pub fn write_products_csv(products: &[ProductStat], writer: impl Write) -> Result<(), IoError> {
    write_rows(PRODUCT_HEADER, products, writer, |p| {
        [
            p.product_name.clone(),
            p.total_quantity.to_string(),
            money(p.total_revenue),
        ]
    })
}

pub fn write_customers_csv(customers: &[CustomerStat], writer: impl Write) -> Result<(), IoError> {
    write_rows(CUSTOMER_HEADER, customers, writer, |c| {
        [
            c.customer_id.clone(),
            money(c.total_spent),
            c.purchase_count.to_string(),
            money(c.avg_order_value),
            c.products_bought.join(", "),
        ]
    })
}

pub fn write_daily_trend_csv(days: &[DayStat], writer: impl Write) -> Result<(), IoError> {
    write_rows(DAILY_TREND_HEADER, days, writer, |d| {
        [
            d.date.clone(),
            money(d.revenue),
            d.transaction_count.to_string(),
            d.unique_customers.to_string(),
        ]
    })
}

fn create(dir: &Path, name: &str) -> Result<(PathBuf, std::io::BufWriter<std::fs::File>), IoError> {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).map_err(|e| IoError::write(&path, e))?;
    Ok((path, std::io::BufWriter::new(file)))
}

/// Write all five summary files into `dir`, creating it if needed.
/// Returns the paths written, in a fixed order.
pub fn export_all(report: &AnalyticsReport, dir: &Path) -> Result<Vec<PathBuf>, IoError> {
    std::fs::create_dir_all(dir).map_err(|e| IoError::write(dir, e))?;
    let mut written = Vec::with_capacity(5);

    let (path, w) = create(dir, REGION_FILE)?;
    write_region_csv(&report.regions, w)?;
    written.push(path);

    let (path, w) = create(dir, TOP_PRODUCTS_FILE)?;
    write_products_csv(&report.top_products, w)?;
    written.push(path);

    let (path, w) = create(dir, CUSTOMER_FILE)?;
    write_customers_csv(&report.customers, w)?;
    written.push(path);

    let (path, w) = create(dir, DAILY_TREND_FILE)?;
    write_daily_trend_csv(&report.daily_trend, w)?;
    written.push(path);

    let (path, w) = create(dir, LOW_PRODUCTS_FILE)?;
    write_products_csv(&report.low_performers, w)?;
    written.push(path);

    for path in &written {
        log::info!("exported {}", path.display());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesgrid_analytics::RegionKey;

    #[test]
    fn region_rows_use_blank_for_unknown() {
        let regions = vec![
            RegionStat {
                region: RegionKey::Named("North".into()),
                total_sales: 25.0,
                transaction_count: 2,
                percentage: 55.56,
            },
            RegionStat {
                region: RegionKey::Unknown,
                total_sales: 20.0,
                transaction_count: 1,
                percentage: 44.44,
            },
        ];
        let mut buf = Vec::new();
        write_region_csv(&regions, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Region,Total Sales,Transaction Count,Percentage\n\
             North,25.00,2,55.56\n\
             ,20.00,1,44.44\n"
        );
    }

    #[test]
    fn customer_products_joined_and_quoted() {
        let customers = vec![CustomerStat {
            customer_id: "C001".into(),
            total_spent: 150.0,
            purchase_count: 3,
            avg_order_value: 50.0,
            products_bought: vec!["Cable".into(), "Mouse".into()],
        }];
        let mut buf = Vec::new();
        write_customers_csv(&customers, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().nth(1), Some("C001,150.00,3,50.00,\"Cable, Mouse\""));
    }

    #[test]
    fn empty_rows_still_write_header() {
        let mut buf = Vec::new();
        write_daily_trend_csv(&[], &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Date,Revenue,TransactionCount,UniqueCustomers\n"
        );
    }
}
