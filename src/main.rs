use anyhow::Result;
use clap::{Parser, Subcommand};

use budgetdash::cli::{
    handle_goals, handle_health, handle_login, handle_logout, handle_overview,
    handle_prefs_command, handle_report, handle_tenant_command, handle_transaction_command,
    handle_whoami, CliContext, PeriodArgs,
};
use budgetdash::config::{DashPaths, Settings};
use budgetdash::logging;
use budgetdash::session::Session;

#[derive(Parser)]
#[command(
    name = "budgetdash",
    author = "Kaylee Beyene",
    version,
    about = "Terminal dashboard for a household budgeting API",
    long_about = "budgetdash shows monthly KPIs, transactions, spending by category \
                  and savings goals from a budgeting GraphQL API, either as plain \
                  command output or as an interactive terminal dashboard."
)]
struct Cli {
    /// GraphQL endpoint URL
    #[arg(long, global = true, env = "BUDGETDASH_ENDPOINT")]
    endpoint: Option<String>,

    /// API key sent as x-api-key
    #[arg(long, global = true, env = "BUDGETDASH_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Check that the API is reachable
    Health,

    /// Log in and store the session token
    Login {
        /// Account email (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,
        /// Tenant type to log in to
        #[arg(short, long, default_value = "PERSONAL")]
        tenant: String,
        /// Read the password from stdin instead of prompting
        #[arg(long)]
        password_stdin: bool,
    },

    /// Forget the stored session token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Tenant commands
    #[command(subcommand)]
    Tenants(budgetdash::cli::TenantCommands),

    /// Monthly KPIs, budget vs actual and category breakdown
    Overview {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Transaction commands
    #[command(subcommand, alias = "tx")]
    Transactions(budgetdash::cli::TransactionCommands),

    /// Savings goal progress
    Goals,

    /// Spending by category for a month
    Report {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Dashboard preferences
    #[command(subcommand)]
    Prefs(budgetdash::cli::PrefsCommands),

    /// Show configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = DashPaths::new()?;
    let settings = Settings::load_or_create(&paths)?.with_overrides(cli.endpoint, cli.api_key);

    let level = logging::resolve_level(&settings.log_level, cli.verbose);
    if matches!(cli.command, Some(Commands::Tui)) {
        paths.ensure_directories()?;
        logging::init_file(&paths.log_file(), level)?;
    } else {
        logging::init_stderr(level);
    }
    log::debug!("Using data directory {}", paths.base_dir().display());

    let session = Session::load(&paths)?;
    let mut ctx = CliContext::new(settings, session);

    match cli.command {
        Some(Commands::Tui) => {
            budgetdash::tui::run_tui(ctx.settings, ctx.session)?;
        }
        Some(Commands::Health) => handle_health(&ctx)?,
        Some(Commands::Login {
            email,
            tenant,
            password_stdin,
        }) => handle_login(&mut ctx, email, tenant, password_stdin)?,
        Some(Commands::Logout) => handle_logout(&mut ctx)?,
        Some(Commands::Whoami) => handle_whoami(&ctx)?,
        Some(Commands::Tenants(cmd)) => handle_tenant_command(&mut ctx, cmd)?,
        Some(Commands::Overview { period }) => handle_overview(&mut ctx, period)?,
        Some(Commands::Transactions(cmd)) => handle_transaction_command(&mut ctx, cmd)?,
        Some(Commands::Goals) => handle_goals(&mut ctx)?,
        Some(Commands::Report { period }) => handle_report(&mut ctx, period)?,
        Some(Commands::Prefs(cmd)) => handle_prefs_command(&mut ctx, cmd)?,
        Some(Commands::Config) => {
            let settings = &ctx.settings;
            println!("budgetdash Configuration");
            println!("========================");
            println!("Data directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Session files:    {}", paths.session_dir().display());
            println!("Log file:         {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  Endpoint:         {}", settings.endpoint);
            println!(
                "  API key:          {}",
                if settings.api_key.is_some() { "set" } else { "not set" }
            );
            println!("  Request timeout:  {}s", settings.request_timeout_secs);
            println!("  Currency:         {}", settings.default_currency);
            println!("  Log level:        {}", settings.log_level);
            println!();
            println!(
                "Session:          {}",
                match ctx.session.user() {
                    Some(user) => format!("logged in as {}", user.email),
                    None => "not logged in".to_string(),
                }
            );
        }
        None => {
            println!("budgetdash - budgeting dashboard for the terminal");
            println!();
            println!("Run 'budgetdash --help' for usage information.");
            println!("Run 'budgetdash tui' to launch the interactive interface.");
        }
    }

    Ok(())
}
