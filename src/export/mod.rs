//! Export module for budgetdash
//!
//! Writes fetched transactions in three formats:
//! - CSV: one row per transaction (spreadsheet-compatible)
//! - JSON: versioned envelope with tenant, filters and totals
//! - YAML: the same envelope, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::io::Write;

pub use self::csv::export_transactions_csv;
pub use self::json::{export_transactions_json, TransactionExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_transactions_yaml;

use clap::ValueEnum;

use crate::error::DashResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One row per transaction
    Csv,
    /// Versioned envelope with totals
    Json,
    /// Same envelope, human-readable
    #[value(alias = "yml")]
    Yaml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Write `export` in the requested format
pub fn write_export<W: Write>(
    format: ExportFormat,
    export: &TransactionExport,
    writer: &mut W,
) -> DashResult<()> {
    match format {
        ExportFormat::Csv => export_transactions_csv(&export.transactions, writer),
        ExportFormat::Json => export_transactions_json(export, writer),
        ExportFormat::Yaml => export_transactions_yaml(export, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::tests::sample_export;

    #[test]
    fn test_format_parsing() {
        assert_eq!(ExportFormat::from_str("csv", true).unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_str("yml", true).unwrap(), ExportFormat::Yaml);
        assert!(ExportFormat::from_str("xlsx", true).is_err());
    }

    #[test]
    fn test_write_export_dispatches() {
        let export = sample_export();
        for format in [ExportFormat::Csv, ExportFormat::Json, ExportFormat::Yaml] {
            let mut out = Vec::new();
            write_export(format, &export, &mut out).unwrap();
            assert!(!out.is_empty(), "{} produced no output", format);
        }
    }
}
