//! YAML export of fetched transactions

use std::io::Write;

use crate::error::{DashError, DashResult};
use crate::export::json::TransactionExport;

/// Write the export as YAML with a short comment header
pub fn export_transactions_yaml<W: Write>(
    export: &TransactionExport,
    writer: &mut W,
) -> DashResult<()> {
    let header = format!(
        "# budgetdash transaction export\n# Generated: {}\n# Tenant: {}\n# Filters: {}\n\n",
        export.exported_at,
        export.tenant_id,
        export.filters.summary()
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| DashError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| DashError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::tests::sample_export;

    #[test]
    fn test_yaml_output_parses_back() {
        let mut out = Vec::new();
        export_transactions_yaml(&sample_export(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# budgetdash transaction export"));
        assert!(text.contains("# Filters: April 2025"));

        let parsed: TransactionExport = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed.transactions.len(), 2);
        assert_eq!(parsed.tenant_id.as_str(), "home");
    }
}
