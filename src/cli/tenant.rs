//! Tenant CLI commands

use clap::Subcommand;

use super::CliContext;
use crate::display::format_tenant_list;
use crate::error::DashResult;
use crate::models::TenantId;

#[derive(Subcommand)]
pub enum TenantCommands {
    /// List the tenants you can access
    List,
    /// Switch the active tenant
    Use {
        /// Tenant ID
        id: String,
    },
}

pub fn handle_tenant_command(ctx: &mut CliContext, cmd: TenantCommands) -> DashResult<()> {
    let client = ctx.authed_client()?;
    let result = client.tenants();
    let tenants = ctx.guard(result)?;

    let auto_selected = ctx.session.set_tenants(tenants)?;

    match cmd {
        TenantCommands::List => {
            if auto_selected {
                log::info!("No tenant was selected; defaulted to the first one");
            }
            print!(
                "{}",
                format_tenant_list(ctx.session.tenant.tenants(), ctx.session.tenant_id())
            );
        }
        TenantCommands::Use { id } => {
            let changed = ctx.session.select_tenant(TenantId::new(id.trim()))?;
            let name = ctx.session.tenant.active_name().unwrap_or_default();
            if changed {
                println!("Switched to tenant: {}", name);
            } else {
                println!("Already using tenant: {}", name);
            }
        }
    }

    Ok(())
}
