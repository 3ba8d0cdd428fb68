//! Dashboard preferences
//!
//! Feature toggles plus the selected review month. Stored values are merged
//! over the defaults field by field, and an out-of-range month falls back to
//! the current one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::DashPaths;
use crate::error::{DashError, DashResult};
use crate::models::ReviewPeriod;
use crate::storage::{read_json_opt, remove_if_exists, write_json_atomic};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub show_budget_vs_actual: bool,
    pub show_category_breakdown: bool,
    pub show_savings_goals: bool,
    pub selected_month: u32,
    pub selected_year: i32,
}

/// Boolean preference keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    BudgetVsActual,
    CategoryBreakdown,
    SavingsGoals,
}

impl Toggle {
    pub const ALL: [Toggle; 3] = [
        Toggle::BudgetVsActual,
        Toggle::CategoryBreakdown,
        Toggle::SavingsGoals,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::BudgetVsActual => "Show budget vs. actual",
            Self::CategoryBreakdown => "Show category breakdown",
            Self::SavingsGoals => "Show savings goals",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::BudgetVsActual => {
                "Display the monthly chart comparing planned versus actual spending."
            }
            Self::CategoryBreakdown => "Include the chart summarising spending by category.",
            Self::SavingsGoals => "Keep the savings goals panel visible on the dashboard.",
        }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Self::BudgetVsActual => "budget-vs-actual",
            Self::CategoryBreakdown => "category-breakdown",
            Self::SavingsGoals => "savings-goals",
        };
        f.write_str(key)
    }
}

impl FromStr for Toggle {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "budget-vs-actual" | "budget" => Ok(Self::BudgetVsActual),
            "category-breakdown" | "breakdown" => Ok(Self::CategoryBreakdown),
            "savings-goals" | "goals" => Ok(Self::SavingsGoals),
            other => Err(DashError::Validation(format!(
                "Unknown preference '{}'. Expected budget-vs-actual, category-breakdown or savings-goals",
                other
            ))),
        }
    }
}

/// Loosely-typed stored form; missing fields use the default
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPreferences {
    show_budget_vs_actual: Option<bool>,
    show_category_breakdown: Option<bool>,
    show_savings_goals: Option<bool>,
    selected_month: Option<serde_json::Value>,
    selected_year: Option<serde_json::Value>,
}

impl Default for Preferences {
    fn default() -> Self {
        let period = ReviewPeriod::current();
        Self {
            show_budget_vs_actual: true,
            show_category_breakdown: true,
            show_savings_goals: true,
            selected_month: period.month,
            selected_year: period.year,
        }
    }
}

fn as_number(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl Preferences {
    fn merged(stored: StoredPreferences) -> Self {
        let defaults = Self::default();

        let selected_month = stored
            .selected_month
            .as_ref()
            .and_then(as_number)
            .filter(|m| (1..=12).contains(m))
            .map(|m| m as u32)
            .unwrap_or(defaults.selected_month);

        let selected_year = stored
            .selected_year
            .as_ref()
            .and_then(as_number)
            .and_then(|y| i32::try_from(y).ok())
            .unwrap_or(defaults.selected_year);

        Self {
            show_budget_vs_actual: stored
                .show_budget_vs_actual
                .unwrap_or(defaults.show_budget_vs_actual),
            show_category_breakdown: stored
                .show_category_breakdown
                .unwrap_or(defaults.show_category_breakdown),
            show_savings_goals: stored
                .show_savings_goals
                .unwrap_or(defaults.show_savings_goals),
            selected_month,
            selected_year,
        }
    }

    /// Load preferences, dropping a stored file that cannot be parsed at all
    pub fn load(paths: &DashPaths) -> DashResult<Self> {
        let path = paths.preferences_file();
        match read_json_opt::<StoredPreferences, _>(&path) {
            Ok(Some(stored)) => Ok(Self::merged(stored)),
            Ok(None) => Ok(Self::default()),
            Err(e) => {
                log::warn!("Failed to parse stored preferences, resetting: {}", e);
                remove_if_exists(&path)?;
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, paths: &DashPaths) -> DashResult<()> {
        write_json_atomic(paths.preferences_file(), self)
    }

    pub fn is_enabled(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::BudgetVsActual => self.show_budget_vs_actual,
            Toggle::CategoryBreakdown => self.show_category_breakdown,
            Toggle::SavingsGoals => self.show_savings_goals,
        }
    }

    /// Flip a toggle and return its new value
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let slot = match toggle {
            Toggle::BudgetVsActual => &mut self.show_budget_vs_actual,
            Toggle::CategoryBreakdown => &mut self.show_category_breakdown,
            Toggle::SavingsGoals => &mut self.show_savings_goals,
        };
        *slot = !*slot;
        *slot
    }

    pub fn period(&self) -> ReviewPeriod {
        ReviewPeriod::new(self.selected_year, self.selected_month)
            .unwrap_or_else(|_| ReviewPeriod::current())
    }

    pub fn set_period(&mut self, period: ReviewPeriod) {
        self.selected_month = period.month;
        self.selected_year = period.year;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(temp_dir: &TempDir) -> DashPaths {
        let paths = DashPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        paths
    }

    #[test]
    fn test_defaults_enable_everything() {
        let prefs = Preferences::default();
        assert!(Toggle::ALL.iter().all(|t| prefs.is_enabled(*t)));
        assert_eq!(prefs.period(), ReviewPeriod::current());
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = paths(&temp_dir);
        std::fs::write(
            paths.preferences_file(),
            r#"{"showSavingsGoals": false, "selectedMonth": "4", "selectedYear": 2024}"#,
        )
        .unwrap();

        let prefs = Preferences::load(&paths).unwrap();
        assert!(!prefs.show_savings_goals);
        assert!(prefs.show_budget_vs_actual);
        assert_eq!(prefs.period(), ReviewPeriod::new(2024, 4).unwrap());
    }

    #[test]
    fn test_invalid_month_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let paths = paths(&temp_dir);
        std::fs::write(paths.preferences_file(), r#"{"selectedMonth": 13}"#).unwrap();

        let prefs = Preferences::load(&paths).unwrap();
        assert_eq!(prefs.selected_month, ReviewPeriod::current().month);
    }

    #[test]
    fn test_garbage_file_resets() {
        let temp_dir = TempDir::new().unwrap();
        let paths = paths(&temp_dir);
        std::fs::write(paths.preferences_file(), "[[[").unwrap();

        assert_eq!(Preferences::load(&paths).unwrap(), Preferences::default());
        assert!(!paths.preferences_file().exists());
    }

    #[test]
    fn test_toggle_and_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = paths(&temp_dir);

        let mut prefs = Preferences::default();
        assert!(!prefs.toggle(Toggle::CategoryBreakdown));
        prefs.set_period(ReviewPeriod::new(2023, 11).unwrap());
        prefs.save(&paths).unwrap();

        let loaded = Preferences::load(&paths).unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_toggle_parsing() {
        assert_eq!("goals".parse::<Toggle>().unwrap(), Toggle::SavingsGoals);
        assert_eq!(
            "Budget_Vs_Actual".parse::<Toggle>().unwrap(),
            Toggle::BudgetVsActual
        );
        assert!("colour".parse::<Toggle>().is_err());
    }
}
