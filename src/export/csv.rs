//! CSV export of fetched transactions

use std::io::Write;

use serde::Serialize;

use crate::error::{DashError, DashResult};
use crate::models::Transaction;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Currency")]
    currency: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Tagged By")]
    tagged_by: &'a str,
}

impl<'a> From<&'a Transaction> for CsvRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            id: txn.id.as_str(),
            date: &txn.date,
            description: txn.description.as_deref().unwrap_or(""),
            amount: txn.amount.to_decimal_string(),
            currency: &txn.currency,
            category: txn.category.as_deref().unwrap_or(""),
            tagged_by: txn.tagged_by.as_deref().unwrap_or(""),
        }
    }
}

/// Write transactions as CSV with a header row
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: &mut W,
) -> DashResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    if transactions.is_empty() {
        csv_writer
            .write_record([
                "ID",
                "Date",
                "Description",
                "Amount",
                "Currency",
                "Category",
                "Tagged By",
            ])
            .map_err(|e| DashError::Export(e.to_string()))?;
    }

    for txn in transactions {
        csv_writer
            .serialize(CsvRow::from(txn))
            .map_err(|e| DashError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| DashError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::tests::sample_export;

    #[test]
    fn test_export_transactions_csv() {
        let export = sample_export();
        let mut out = Vec::new();
        export_transactions_csv(&export.transactions, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "ID,Date,Description,Amount,Currency,Category,Tagged By");
        assert_eq!(lines[1], "t1,2025-04-03,Salary,50000.00,INR,Income,");
        assert_eq!(lines[2], "t2,2025-04-01,\"Rent, April\",-20000.00,INR,Rent,user");
    }

    #[test]
    fn test_empty_export_still_has_header() {
        let mut out = Vec::new();
        export_transactions_csv(&[], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ID,Date,Description,Amount,Currency,Category,Tagged By\n"
        );
    }
}
