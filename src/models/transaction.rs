//! Transaction model
//!
//! Transactions are produced by the API. The client only ever edits the
//! category and `tagged_by` fields (through reclassification); id and date are
//! never touched locally.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::TransactionId;
use super::money::Money;

/// Provenance marker applied when the user picks a category by hand
pub const USER_TAGGED: &str = "user";

fn default_currency() -> String {
    "INR".to_string()
}

/// A single transaction row as returned by the `transactions` query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,

    /// Raw date string from the API (usually `YYYY-MM-DD`)
    pub date: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Signed amount: negative is money out
    #[serde(default)]
    pub amount: Money,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,

    /// Who assigned the category (`user`, a rule name, a model name, ...)
    #[serde(default)]
    pub tagged_by: Option<String>,

    /// Confidence of an automatic categorisation, when the API supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Transaction {
    /// Parse the leading `YYYY-MM-DD` of the date string
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let head = self.date.get(..10).unwrap_or(&self.date);
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    }

    /// Date formatted with `format`, falling back to the raw string
    pub fn display_date(&self, format: &str) -> String {
        self.parsed_date()
            .map(|d| d.format(format).to_string())
            .unwrap_or_else(|| self.date.clone())
    }

    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("(no description)")
    }

    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or("Uncategorized")
    }

    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }

    pub fn is_user_tagged(&self) -> bool {
        self.tagged_by.as_deref() == Some(USER_TAGGED)
    }

    /// The fields reclassification may change, captured for rollback
    pub fn tag_state(&self) -> TagState {
        TagState {
            category: self.category.clone(),
            tagged_by: self.tagged_by.clone(),
        }
    }

    /// Overwrite category and provenance; identity and date stay as they are
    pub fn apply_tag_state(&mut self, state: &TagState) {
        self.category = state.category.clone();
        self.tagged_by = state.tagged_by.clone();
    }
}

/// Category plus provenance: the mutable part of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagState {
    pub category: Option<String>,
    pub tagged_by: Option<String>,
}

impl TagState {
    /// What a manual reclassification to `category` looks like locally
    pub fn user_tagged(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            tagged_by: Some(USER_TAGGED.to_string()),
        }
    }
}

/// One page of the `transactions` query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    #[serde(default)]
    pub items: Vec<Transaction>,

    /// Continuation cursor; `None` means there are no further pages
    #[serde(default)]
    pub cursor: Option<String>,
}

impl TransactionPage {
    pub fn is_last(&self) -> bool {
        self.cursor.is_none()
    }
}

/// Result of the `reclassifyTransaction` mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReclassifiedTransaction {
    pub id: TransactionId,
    pub category: String,
    #[serde(default)]
    pub tagged_by: Option<String>,
}
