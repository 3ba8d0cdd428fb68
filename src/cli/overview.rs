//! Overview CLI command

use super::{CliContext, PeriodArgs};
use crate::display::{format_goal_list, format_overview};
use crate::error::DashResult;

pub fn handle_overview(ctx: &mut CliContext, period: PeriodArgs) -> DashResult<()> {
    let client = ctx.authed_client()?;
    let tenant = ctx.session.require_tenant()?;
    let period = period.resolve(ctx.session.period())?;

    let result = client.monthly_review(&tenant, period);
    let review = ctx.guard(result)?;

    let currency = ctx.settings.default_currency.clone();
    print!(
        "{}",
        format_overview(period, &review, &ctx.session.preferences, &currency)
    );

    if ctx.session.preferences.show_savings_goals {
        let result = client.savings_goals(&tenant);
        match ctx.guard(result) {
            Ok(goals) => {
                println!("\nSavings goals");
                print!("{}", format_goal_list(&goals, &currency));
            }
            // the overview still stands on its own
            Err(e) if !e.is_auth_failure() => {
                log::warn!("Failed to load savings goals: {}", e);
                println!("\nSavings goals: failed to load.");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
