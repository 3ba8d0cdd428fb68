//! Monthly overview formatting

use super::progress_bar;
use crate::models::{MonthlyReview, ReviewPeriod};
use crate::services::overview::{category_shares, format_rate, OverviewKpis};
use crate::session::Preferences;

/// Render KPIs, series and breakdown as plain text, honouring preferences
pub fn format_overview(
    period: ReviewPeriod,
    review: &MonthlyReview,
    prefs: &Preferences,
    currency: &str,
) -> String {
    let kpis = OverviewKpis::from_review(review);
    let money = |m: crate::models::Money| m.format_with_code(currency);
    let mut output = String::new();

    output.push_str(&format!("Overview for {}\n", period.label()));
    output.push_str(&"=".repeat(40));
    output.push('\n');

    output.push_str(&format!(
        "Available Balance: {:>16}   Saved this month: {} ({})\n",
        money(kpis.available_balance),
        money(kpis.savings.abs()),
        format_rate(kpis.savings_rate)
    ));
    output.push_str(&format!(
        "Budget Remaining:  {:>16}   Spent so far:     {} ({})\n\n",
        money(kpis.budget_remaining),
        money(kpis.actual.abs()),
        format_rate(kpis.spending_rate)
    ));

    output.push_str(&format!("  Income    {:>16}\n", money(kpis.income)));
    output.push_str(&format!("  Expenses  {:>16}\n", money(kpis.expenses)));
    output.push_str(&format!("  Savings   {:>16}\n", money(kpis.savings)));
    output.push_str(&format!("  Budget    {:>16}\n", money(kpis.budget)));

    if prefs.show_budget_vs_actual {
        output.push_str("\nBudget vs actual\n");
        if review.series.is_empty() {
            output.push_str("  No series data for this period.\n");
        }
        for point in &review.series {
            let marker = if point.actual > point.budget { "!" } else { " " };
            output.push_str(&format!(
                "  {:<12} {:>14} {:>14} {}\n",
                point.date,
                money(point.budget),
                money(point.actual),
                marker
            ));
        }
    }

    if prefs.show_category_breakdown {
        output.push_str("\nSpending by category\n");
        let shares = category_shares(&review.category_breakdown);
        if shares.is_empty() {
            output.push_str("  No spending recorded.\n");
        }
        for share in shares {
            output.push_str(&format!(
                "  {:<18} {:>14} {} {:>5.1}%\n",
                share.name,
                money(share.amount),
                progress_bar(share.share, 20),
                share.share * 100.0
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryAmount, Money, SeriesPoint};

    fn review() -> MonthlyReview {
        MonthlyReview {
            total_income: Money::from_units(1000),
            total_expenses: Money::from_units(600),
            savings: Money::from_units(350),
            category_breakdown: vec![CategoryAmount {
                name: "Rent".into(),
                amount: Money::from_units(400),
            }],
            series: vec![SeriesPoint {
                date: "2025-04-01".into(),
                budget: Money::from_units(500),
                actual: Money::from_units(520),
            }],
        }
    }

    #[test]
    fn test_overview_text() {
        let period = ReviewPeriod::new(2025, 4).unwrap();
        let out = format_overview(period, &review(), &Preferences::default(), "INR");

        assert!(out.starts_with("Overview for April 2025"));
        assert!(out.contains("₹350.00 (35.0%)"));
        assert!(out.contains("Budget vs actual"));
        assert!(out.contains("Rent"));
    }

    #[test]
    fn test_preferences_hide_sections() {
        let prefs = Preferences {
            show_budget_vs_actual: false,
            show_category_breakdown: false,
            ..Preferences::default()
        };
        let period = ReviewPeriod::new(2025, 4).unwrap();
        let out = format_overview(period, &review(), &prefs, "INR");

        assert!(!out.contains("Budget vs actual"));
        assert!(!out.contains("Spending by category"));
    }
}
