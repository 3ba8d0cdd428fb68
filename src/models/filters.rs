//! Transaction query filters
//!
//! The filter set doubles as the key of the transaction feed: two requests
//! belong to the same list exactly when their filters are equal.

use serde::{Deserialize, Serialize};

use super::period::ReviewPeriod;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilters {
    pub year: i32,
    pub month: u32,

    /// Free-text search over descriptions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TransactionFilters {
    /// Filters for a whole month with no narrowing
    pub fn for_period(period: ReviewPeriod) -> Self {
        Self {
            year: period.year,
            month: period.month,
            search: None,
            category: None,
            bank_name: None,
        }
    }

    pub fn period(&self) -> ReviewPeriod {
        ReviewPeriod::new(self.year, self.month).unwrap_or_else(|_| ReviewPeriod::current())
    }

    pub fn with_period(mut self, period: ReviewPeriod) -> Self {
        self.year = period.year;
        self.month = period.month;
        self
    }

    /// Set the free-text filter; blank input clears it
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = non_blank(search);
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = non_blank(category);
        self
    }

    pub fn with_bank(mut self, bank_name: Option<String>) -> Self {
        self.bank_name = non_blank(bank_name);
        self
    }

    pub fn has_narrowing(&self) -> bool {
        self.search.is_some() || self.category.is_some() || self.bank_name.is_some()
    }

    /// Short human summary, e.g. `April 2025 · category=Food`
    pub fn summary(&self) -> String {
        let mut parts = vec![self.period().label()];
        if let Some(search) = &self.search {
            parts.push(format!("search=\"{}\"", search));
        }
        if let Some(category) = &self.category {
            parts.push(format!("category={}", category));
        }
        if let Some(bank) = &self.bank_name {
            parts.push(format!("bank={}", bank));
        }
        parts.join(" · ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_filters_are_dropped() {
        let filters = TransactionFilters::for_period(ReviewPeriod::new(2025, 4).unwrap())
            .with_search(Some("   ".into()))
            .with_category(Some(" Food ".into()));

        assert!(filters.search.is_none());
        assert_eq!(filters.category.as_deref(), Some("Food"));
        assert!(filters.has_narrowing());
    }

    #[test]
    fn test_wire_shape_skips_unset_fields() {
        let filters = TransactionFilters::for_period(ReviewPeriod::new(2025, 4).unwrap())
            .with_bank(Some("HDFC".into()));
        let json = serde_json::to_value(&filters).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"year": 2025, "month": 4, "bankName": "HDFC"})
        );
    }

    #[test]
    fn test_summary() {
        let filters = TransactionFilters::for_period(ReviewPeriod::new(2025, 4).unwrap())
            .with_category(Some("Food".into()));
        assert_eq!(filters.summary(), "April 2025 · category=Food");
    }
}
