//! Session CLI commands: health, login, logout, whoami

use std::io::{self, BufRead, Write};

use zeroize::Zeroizing;

use super::CliContext;
use crate::display::format_user;
use crate::error::{DashError, DashResult};
use crate::models::TenantId;
use crate::services::health::{self, HealthStatus};

/// Run the pre-flight health check
pub fn handle_health(ctx: &CliContext) -> DashResult<()> {
    let client = ctx.client()?;
    let status = health::check(&client);

    match &status {
        HealthStatus::Healthy(_) => {
            println!("{}: {}", status.title(), status.message());
            Ok(())
        }
        HealthStatus::Forbidden => Err(DashError::Http {
            status: 403,
            message: status.message(),
        }),
        HealthStatus::Unreachable(detail) => Err(DashError::Network(format!(
            "{}: {}",
            status.title(),
            detail
        ))),
    }
}

fn read_line(prompt: &str) -> DashResult<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn read_password(from_stdin: bool) -> DashResult<Zeroizing<String>> {
    if from_stdin {
        let mut line = Zeroizing::new(String::new());
        io::stdin().lock().read_line(&mut line)?;
        let trimmed = Zeroizing::new(line.trim_end_matches(['\r', '\n']).to_string());
        return Ok(trimmed);
    }
    rpassword::prompt_password("Password: ")
        .map(Zeroizing::new)
        .map_err(|e| DashError::Io(format!("Failed to read password: {}", e)))
}

/// Exchange credentials for a token and store the session
pub fn handle_login(
    ctx: &mut CliContext,
    email: Option<String>,
    tenant: String,
    password_stdin: bool,
) -> DashResult<()> {
    let email = match email {
        Some(email) => email,
        None if password_stdin => {
            return Err(DashError::Validation(
                "--email is required with --password-stdin".into(),
            ))
        }
        None => read_line("Email: ")?,
    };
    let password = read_password(password_stdin)?;
    let tenant = TenantId::new(tenant.trim());

    let client = ctx.client()?;
    let response = client.login(&email, &password, &tenant)?;
    ctx.session.login(response, &tenant)?;

    if let Some(user) = ctx.session.user() {
        println!("Logged in as {} <{}>", user.name, user.email);
    }
    if let Some(tenant) = ctx.session.tenant_id() {
        println!("Active tenant: {}", tenant);
    }
    Ok(())
}

pub fn handle_logout(ctx: &mut CliContext) -> DashResult<()> {
    if !ctx.session.is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }
    ctx.session.logout()?;
    println!("Logged out.");
    Ok(())
}

pub fn handle_whoami(ctx: &CliContext) -> DashResult<()> {
    match ctx.session.user() {
        Some(user) => {
            let tenant_name = ctx.session.tenant.active_name();
            print!("{}", format_user(user, tenant_name.as_deref()));
            Ok(())
        }
        None => Err(DashError::Unauthenticated(
            "Not logged in. Run 'budgetdash login' first".into(),
        )),
    }
}
