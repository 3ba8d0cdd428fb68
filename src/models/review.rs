//! Monthly review aggregates
//!
//! Totals are computed by the API. Every numeric field tolerates `null` or
//! absence and reads as zero.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Totals and breakdowns for one (month, year)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReview {
    #[serde(default)]
    pub total_income: Money,

    #[serde(default)]
    pub total_expenses: Money,

    /// Savings as reported by the API; absent reads as zero
    #[serde(default)]
    pub savings: Money,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub category_breakdown: Vec<CategoryAmount>,

    #[serde(default, deserialize_with = "nullable_vec")]
    pub series: Vec<SeriesPoint>,
}

/// One slice of the spending breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub name: String,
    #[serde(default)]
    pub amount: Money,
}

/// Planned budget versus actual spend at one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: String,
    #[serde(default)]
    pub budget: Money,
    #[serde(default)]
    pub actual: Money,
}

/// Treat `null` lists like missing ones
pub(crate) fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
