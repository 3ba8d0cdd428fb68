//! Transaction display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::truncate;
use crate::models::{category_glyph, ReclassifiedTransaction, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Tagged")]
    tagged_by: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, date_format: &str) -> Self {
        Self {
            date: txn.display_date(date_format),
            description: truncate(txn.description_or_default(), 32),
            category: format!(
                "{} {}",
                category_glyph(txn.category.as_deref()),
                txn.category_or_default()
            ),
            amount: txn.amount.format_with_code(&txn.currency),
            tagged_by: txn.tagged_by.clone().unwrap_or_default(),
            id: txn.id.to_string(),
        }
    }
}

/// Format transactions as a table, or the empty-state line
pub fn format_transaction_table(transactions: &[Transaction], date_format: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions
        .iter()
        .map(|t| TransactionRow::new(t, date_format));
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(3)).with(Alignment::right()));
    format!("{}\n", table)
}

/// Trailer printed under a listing
pub fn format_page_footer(shown: usize, more_available: bool) -> String {
    if more_available {
        format!(
            "{} transaction(s) shown. More available: use --pages N or --all.\n",
            shown
        )
    } else {
        format!("{} transaction(s).\n", shown)
    }
}

pub fn format_reclassified(result: &ReclassifiedTransaction) -> String {
    format!(
        "Reclassified {} as {} {} (tagged by {})\n",
        result.id,
        category_glyph(Some(&result.category)),
        result.category,
        result.tagged_by.as_deref().unwrap_or("-")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionId};

    fn txn() -> Transaction {
        Transaction {
            id: TransactionId::new("t1"),
            date: "2025-04-03".into(),
            description: Some("Swiggy order".into()),
            amount: Money::from_cents(-45050),
            currency: "INR".into(),
            category: Some("Food".into()),
            sub_category: None,
            tagged_by: Some("rules".into()),
            confidence: None,
        }
    }

    #[test]
    fn test_empty_state() {
        assert_eq!(
            format_transaction_table(&[], "%Y-%m-%d"),
            "No transactions found.\n"
        );
    }

    #[test]
    fn test_table_contains_fields() {
        let out = format_transaction_table(&[txn()], "%d %b %Y");
        assert!(out.contains("Date"));
        assert!(out.contains("03 Apr 2025"));
        assert!(out.contains("Swiggy order"));
        assert!(out.contains("-₹450.50"));
        assert!(out.contains("rules"));
    }

    #[test]
    fn test_footer() {
        assert!(format_page_footer(50, true).contains("--all"));
        assert_eq!(format_page_footer(3, false), "3 transaction(s).\n");
    }
}
