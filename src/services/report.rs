//! Spending-by-category report over loaded transactions

use std::collections::HashMap;

use crate::models::{Money, Transaction};

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    pub category: String,
    pub amount: Money,
    pub share: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpendingReport {
    /// Largest category first
    pub categories: Vec<CategorySpend>,
    pub total_spent: Money,
    /// Outflows skipped because they carry no category
    pub uncategorized: Money,
}

impl SpendingReport {
    /// Total outflows per category; inflows are ignored
    pub fn build(transactions: &[Transaction]) -> Self {
        let mut totals: HashMap<&str, Money> = HashMap::new();
        let mut uncategorized = Money::zero();

        for txn in transactions.iter().filter(|t| t.is_outflow()) {
            match txn.category.as_deref().filter(|c| !c.trim().is_empty()) {
                Some(category) => *totals.entry(category).or_default() += txn.amount.abs(),
                None => uncategorized += txn.amount.abs(),
            }
        }

        let total_spent: Money = totals.values().copied().sum();
        let mut categories: Vec<CategorySpend> = totals
            .into_iter()
            .map(|(category, amount)| CategorySpend {
                category: category.to_string(),
                amount,
                share: amount.ratio_of(total_spent).unwrap_or(0.0),
            })
            .collect();
        categories.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| a.category.cmp(&b.category))
        });

        Self {
            categories,
            total_spent,
            uncategorized,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
