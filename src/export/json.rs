//! JSON export of fetched transactions
//!
//! Wraps the rows in a versioned envelope recording the tenant and filters
//! they were fetched with.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DashError, DashResult};
use crate::models::{Money, TenantId, Transaction, TransactionFilters};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub tenant_id: TenantId,
    pub filters: TransactionFilters,
    pub transactions: Vec<Transaction>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub total_inflow: Money,
    pub total_outflow: Money,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
    /// False when the export stopped before the last page
    pub complete: bool,
}

impl TransactionExport {
    pub fn new(
        tenant_id: TenantId,
        filters: TransactionFilters,
        transactions: Vec<Transaction>,
        complete: bool,
    ) -> Self {
        let dates = transactions.iter().filter_map(|t| t.parsed_date());
        let earliest = dates.clone().min().map(|d| d.to_string());
        let latest = dates.max().map(|d| d.to_string());

        let total_inflow = transactions
            .iter()
            .filter(|t| t.amount.is_positive())
            .map(|t| t.amount)
            .sum();
        let total_outflow = transactions
            .iter()
            .filter(|t| t.is_outflow())
            .map(|t| t.amount.abs())
            .sum();

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            total_inflow,
            total_outflow,
            earliest_transaction: earliest,
            latest_transaction: latest,
            complete,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            tenant_id,
            filters,
            transactions,
            metadata,
        }
    }
}

/// Write the export as pretty-printed JSON
pub fn export_transactions_json<W: Write>(
    export: &TransactionExport,
    writer: &mut W,
) -> DashResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| DashError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| DashError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{ReviewPeriod, TransactionId};

    pub(crate) fn sample_export() -> TransactionExport {
        let rows = vec![
            Transaction {
                id: TransactionId::new("t1"),
                date: "2025-04-03".into(),
                description: Some("Salary".into()),
                amount: Money::from_units(50000),
                currency: "INR".into(),
                category: Some("Income".into()),
                sub_category: None,
                tagged_by: None,
                confidence: None,
            },
            Transaction {
                id: TransactionId::new("t2"),
                date: "2025-04-01".into(),
                description: Some("Rent, April".into()),
                amount: Money::from_units(-20000),
                currency: "INR".into(),
                category: Some("Rent".into()),
                sub_category: None,
                tagged_by: Some("user".into()),
                confidence: None,
            },
        ];
        TransactionExport::new(
            TenantId::new("home"),
            TransactionFilters::for_period(ReviewPeriod::new(2025, 4).unwrap()),
            rows,
            true,
        )
    }

    #[test]
    fn test_metadata() {
        let export = sample_export();
        assert_eq!(export.metadata.transaction_count, 2);
        assert_eq!(export.metadata.total_inflow, Money::from_units(50000));
        assert_eq!(export.metadata.total_outflow, Money::from_units(20000));
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2025-04-01"));
        assert_eq!(export.metadata.latest_transaction.as_deref(), Some("2025-04-03"));
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        export_transactions_json(&sample_export(), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["tenant_id"], "home");
        assert_eq!(value["transactions"][1]["taggedBy"], "user");
        assert_eq!(value["filters"]["month"], 4);
    }
}
