use salesgrid_analytics::{LineItem, Transaction};

use crate::raw::RawRecord;

/// Transactions parsed from raw records, plus how many records were rejected.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub transactions: Vec<Transaction>,
    /// Records whose quantity or unit price did not parse.
    pub rejected: usize,
}

/// Strip thousands separators: `"1,916"` → `"1916"`.
fn clean_number(field: &str) -> String {
    field.replace(',', "").trim().to_string()
}

/// Clean one raw record. `None` when quantity or unit price is not a number.
pub fn parse_record(record: &RawRecord) -> Option<Transaction> {
    let [tx_id, date, product_id, product_name, qty, price, customer_id, region] = record.fields();

    let quantity: i64 = clean_number(qty).parse().ok()?;
    let unit_price: f64 = clean_number(price).parse().ok()?;

    Some(Transaction {
        transaction_id: tx_id.trim().to_string(),
        date: date.trim().to_string(),
        product_id: product_id.trim().to_string(),
        product_name: product_name.replace(',', " ").trim().to_string(),
        customer_id: customer_id.trim().to_string(),
        region: region.trim().to_string(),
        line: LineItem::new(Some(quantity), Some(unit_price)),
    })
}

pub fn parse_transactions(records: &[RawRecord]) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    for record in records {
        match parse_record(record) {
            Some(tx) => outcome.transactions.push(tx),
            None => {
                log::debug!("unparseable numbers in record: {record}");
                outcome.rejected += 1;
            }
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(fields: [&str; 8]) -> RawRecord {
        RawRecord(fields.map(String::from))
    }

    #[test]
    fn cleans_commas() {
        let record = raw([
            "T001",
            "2024-12-01",
            "P101",
            "Laptop,Pro",
            "1,000",
            "45,000.50",
            "C001",
            "North",
        ]);
        let tx = parse_record(&record).unwrap();
        assert_eq!(tx.product_name, "Laptop Pro");
        assert_eq!(tx.quantity(), Some(1000));
        assert_eq!(tx.unit_price(), Some(45000.5));
        assert_eq!(tx.amount(), Some(45_000_500.0));
    }

    #[test]
    fn trims_fields_and_keeps_empty_region() {
        let record = raw([
            " T001 ",
            " 2024-12-01",
            "P101 ",
            " Mouse ",
            " 2 ",
            " 10 ",
            " C001",
            "  ",
        ]);
        let tx = parse_record(&record).unwrap();
        assert_eq!(tx.transaction_id, "T001");
        assert_eq!(tx.date, "2024-12-01");
        assert_eq!(tx.product_name, "Mouse");
        assert_eq!(tx.region, "");
    }

    #[test]
    fn rejects_non_numeric() {
        let records = vec![
            raw(["T001", "2024-12-01", "P101", "Mouse", "two", "10", "C001", "North"]),
            raw(["T002", "2024-12-01", "P101", "Mouse", "2.5", "10", "C001", "North"]),
            raw(["T003", "2024-12-01", "P101", "Mouse", "2", "ten", "C001", "North"]),
            raw(["T004", "2024-12-01", "P101", "Mouse", "2", "10", "C001", "North"]),
        ];
        let outcome = parse_transactions(&records);
        assert_eq!(outcome.rejected, 3);
        assert_eq!(outcome.transactions.len(), 1);
        assert_eq!(outcome.transactions[0].transaction_id, "T004");
    }

    #[test]
    fn negative_quantity_parses() {
        // Rejected later by validation, not here.
        let record = raw(["T001", "2024-12-01", "P101", "Mouse", "-2", "10", "C001", "North"]);
        assert_eq!(parse_record(&record).unwrap().quantity(), Some(-2));
    }
}
