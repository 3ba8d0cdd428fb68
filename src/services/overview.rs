//! Overview KPIs
//!
//! Redisplay figures derived from a monthly review. Only sums and ratios are
//! computed here; every total comes from the server.

use crate::models::{CategoryAmount, Money, MonthlyReview, SeriesPoint};

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewKpis {
    pub income: Money,
    pub expenses: Money,
    /// Server-reported savings, never recomputed
    pub savings: Money,
    /// Sum of the series budget values
    pub budget: Money,
    /// Sum of the series actual values
    pub actual: Money,
    pub budget_remaining: Money,
    /// Income minus expenses
    pub available_balance: Money,
    pub savings_rate: Option<f64>,
    pub spending_rate: Option<f64>,
}

/// One category's part of the spending breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub name: String,
    pub amount: Money,
    /// Fraction of the breakdown total, 0.0 when the total is zero
    pub share: f64,
}

impl OverviewKpis {
    pub fn from_review(review: &MonthlyReview) -> Self {
        let budget: Money = review.series.iter().map(|p| p.budget).sum();
        let actual: Money = review.series.iter().map(|p| p.actual).sum();

        Self {
            income: review.total_income,
            expenses: review.total_expenses,
            savings: review.savings,
            budget,
            actual,
            budget_remaining: (budget - actual).clamp_non_negative(),
            available_balance: review.total_income - review.total_expenses,
            savings_rate: review.savings.ratio_of(review.total_income),
            spending_rate: actual.ratio_of(budget),
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.actual > self.budget
    }
}

/// Breakdown entries with their share of the total, largest first
pub fn category_shares(breakdown: &[CategoryAmount]) -> Vec<CategoryShare> {
    let total: Money = breakdown.iter().map(|c| c.amount.abs()).sum();

    let mut shares: Vec<CategoryShare> = breakdown
        .iter()
        .map(|c| CategoryShare {
            name: c.name.clone(),
            amount: c.amount.abs(),
            share: c.amount.abs().ratio_of(total).unwrap_or(0.0),
        })
        .collect();

    shares.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));
    shares
}

/// Running totals of the series, for the cumulative budget-vs-actual chart
pub fn cumulative_series(series: &[SeriesPoint]) -> Vec<SeriesPoint> {
    let mut budget = Money::zero();
    let mut actual = Money::zero();
    series
        .iter()
        .map(|p| {
            budget += p.budget;
            actual += p.actual;
            SeriesPoint {
                date: p.date.clone(),
                budget,
                actual,
            }
        })
        .collect()
}

/// Format a ratio as a percentage with one decimal, e.g. `35.0%`
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.1}%", (r * 100.0).abs()),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(budget: i64, actual: i64) -> SeriesPoint {
        SeriesPoint {
            date: "2025-04-01".into(),
            budget: Money::from_units(budget),
            actual: Money::from_units(actual),
        }
    }

    #[test]
    fn test_budget_is_sum_of_series() {
        let review = MonthlyReview {
            series: vec![point(500, 480), point(500, 520)],
            ..MonthlyReview::default()
        };
        let kpis = OverviewKpis::from_review(&review);

        assert_eq!(kpis.budget, Money::from_units(1000));
        assert_eq!(kpis.actual, Money::from_units(1000));
        assert_eq!(kpis.budget_remaining, Money::zero());
        assert_eq!(kpis.spending_rate, Some(1.0));
    }

    #[test]
    fn test_savings_comes_from_server() {
        let review = MonthlyReview {
            total_income: Money::from_units(1000),
            total_expenses: Money::from_units(600),
            savings: Money::from_units(350),
            ..MonthlyReview::default()
        };
        let kpis = OverviewKpis::from_review(&review);

        assert_eq!(kpis.savings, Money::from_units(350));
        assert_eq!(kpis.available_balance, Money::from_units(400));
        assert_eq!(kpis.savings_rate, Some(0.35));
    }

    #[test]
    fn test_empty_review_has_no_rates() {
        let kpis = OverviewKpis::from_review(&MonthlyReview::default());
        assert_eq!(kpis.savings, Money::zero());
        assert!(kpis.savings_rate.is_none());
        assert!(kpis.spending_rate.is_none());
        assert_eq!(format_rate(kpis.savings_rate), "-");
    }

    #[test]
    fn test_budget_remaining_never_negative() {
        let review = MonthlyReview {
            series: vec![point(100, 150)],
            ..MonthlyReview::default()
        };
        let kpis = OverviewKpis::from_review(&review);
        assert_eq!(kpis.budget_remaining, Money::zero());
        assert!(kpis.is_over_budget());
    }

    #[test]
    fn test_category_shares_sorted() {
        let breakdown = vec![
            CategoryAmount {
                name: "Food".into(),
                amount: Money::from_units(100),
            },
            CategoryAmount {
                name: "Rent".into(),
                amount: Money::from_units(300),
            },
        ];
        let shares = category_shares(&breakdown);
        assert_eq!(shares[0].name, "Rent");
        assert_eq!(shares[0].share, 0.75);
        assert_eq!(shares[1].share, 0.25);
    }

    #[test]
    fn test_cumulative_series() {
        let cumulative = cumulative_series(&[point(500, 480), point(500, 520)]);
        assert_eq!(cumulative[1].budget, Money::from_units(1000));
        assert_eq!(cumulative[1].actual, Money::from_units(1000));
    }
}
