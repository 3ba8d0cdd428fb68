//! Spending report CLI command

use super::{CliContext, PeriodArgs};
use crate::display::format_spending_report;
use crate::error::DashResult;
use crate::models::TransactionFilters;
use crate::services::{SpendingReport, TransactionFeed};

/// Build the report from every transaction page of the period
pub fn handle_report(ctx: &mut CliContext, period: PeriodArgs) -> DashResult<()> {
    let client = ctx.authed_client()?;
    let tenant = ctx.session.require_tenant()?;
    let period = period.resolve(ctx.session.period())?;

    let mut feed = TransactionFeed::new(TransactionFilters::for_period(period));
    let result = feed.load_all(&client, &tenant, None);
    let pages = ctx.guard(result)?;
    log::debug!("Report built from {} page(s)", pages);

    let report = SpendingReport::build(feed.items());
    print!(
        "{}",
        format_spending_report(period, &report, &ctx.settings.default_currency)
    );
    Ok(())
}
