//! Savings goals

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::GoalId;
use super::money::Money;
use super::review::nullable_vec;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: GoalId,
    pub name: String,
    #[serde(default)]
    pub target: Money,
    #[serde(default)]
    pub current: Money,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub history: Vec<GoalHistoryPoint>,
}

impl SavingsGoal {
    pub fn deadline_date(&self) -> Option<NaiveDate> {
        let raw = self.deadline.as_deref()?;
        let head = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    }

    /// Deadline as "DD Mon YYYY", or a dash when missing
    pub fn deadline_label(&self) -> String {
        match (self.deadline_date(), self.deadline.as_deref()) {
            (Some(date), _) => date.format("%d %b %Y").to_string(),
            (None, Some(raw)) if !raw.is_empty() => raw.to_string(),
            _ => "-".to_string(),
        }
    }

    pub fn remaining(&self) -> Money {
        (self.target - self.current).clamp_non_negative()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalHistoryPoint {
    pub date: String,
    #[serde(default)]
    pub value: Money,
}
