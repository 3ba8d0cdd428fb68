//! Spending report formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{category_glyph, ReviewPeriod};
use crate::services::report::SpendingReport;

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Spent")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
}

pub fn format_spending_report(
    period: ReviewPeriod,
    report: &SpendingReport,
    currency: &str,
) -> String {
    let mut output = format!("Spending by category for {}\n", period.label());

    if report.is_empty() {
        output.push_str("No spending recorded.\n");
        return output;
    }

    let rows = report.categories.iter().map(|c| ReportRow {
        category: format!("{} {}", category_glyph(Some(&c.category)), c.category),
        amount: c.amount.format_with_code(currency),
        share: format!("{:.1}%", c.share * 100.0),
    });
    let mut table = Table::new(rows);
    table.with(Style::psql());

    output.push_str(&format!("{}\n", table));
    output.push_str(&format!(
        "Total spent: {}\n",
        report.total_spent.format_with_code(currency)
    ));
    if !report.uncategorized.is_zero() {
        output.push_str(&format!(
            "Uncategorized outflows (not included): {}\n",
            report.uncategorized.format_with_code(currency)
        ));
    }
    output
}
