//! Savings goals CLI command

use super::CliContext;
use crate::display::format_goal_list;
use crate::error::DashResult;

pub fn handle_goals(ctx: &mut CliContext) -> DashResult<()> {
    let client = ctx.authed_client()?;
    let tenant = ctx.session.require_tenant()?;

    let result = client.savings_goals(&tenant);
    let goals = ctx.guard(result)?;

    print!(
        "{}",
        format_goal_list(&goals, &ctx.settings.default_currency)
    );
    Ok(())
}
