//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the clap
//! argument parsing with the API client and the session.

pub mod auth;
pub mod goals;
pub mod overview;
pub mod prefs;
pub mod report;
pub mod tenant;
pub mod transaction;

pub use auth::{handle_health, handle_login, handle_logout, handle_whoami};
pub use goals::handle_goals;
pub use overview::handle_overview;
pub use prefs::{handle_prefs_command, PrefsCommands};
pub use report::handle_report;
pub use tenant::{handle_tenant_command, TenantCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use clap::Args;

use crate::api::BudgetClient;
use crate::config::Settings;
use crate::error::{DashError, DashResult};
use crate::models::{ReviewPeriod, TransactionFilters};
use crate::session::Session;

/// What every command handler gets
pub struct CliContext {
    pub settings: Settings,
    pub session: Session,
}

impl CliContext {
    pub fn new(settings: Settings, session: Session) -> Self {
        Self { settings, session }
    }

    /// HTTP client carrying the stored token, if any
    pub fn client(&self) -> DashResult<BudgetClient> {
        BudgetClient::from_settings(&self.settings, self.session.token())
    }

    /// Client for commands that need a logged-in user
    pub fn authed_client(&self) -> DashResult<BudgetClient> {
        if !self.session.is_authenticated() {
            return Err(DashError::Unauthenticated(
                "Not logged in. Run 'budgetdash login' first".into(),
            ));
        }
        self.client()
    }

    /// Drop the stored session when the API rejected our credentials
    pub fn guard<T>(&mut self, result: DashResult<T>) -> DashResult<T> {
        match result {
            Err(e) if e.is_auth_failure() => {
                log::warn!("API rejected the session: {}", e);
                self.session.logout()?;
                Err(DashError::Unauthenticated(
                    "Session expired or was rejected. Run 'budgetdash login' again".into(),
                ))
            }
            other => other,
        }
    }
}

/// Month selection; defaults to the period stored in preferences
#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Month (1-12)
    #[arg(short, long)]
    pub month: Option<u32>,
    /// Year (e.g. 2025)
    #[arg(short, long)]
    pub year: Option<i32>,
}

impl PeriodArgs {
    pub fn resolve(&self, default: ReviewPeriod) -> DashResult<ReviewPeriod> {
        ReviewPeriod::new(
            self.year.unwrap_or(default.year),
            self.month.unwrap_or(default.month),
        )
    }
}

/// Transaction query filters
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[command(flatten)]
    pub period: PeriodArgs,
    /// Free-text search over descriptions
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only this category
    #[arg(short, long)]
    pub category: Option<String>,
    /// Only this bank
    #[arg(short, long)]
    pub bank: Option<String>,
}

impl FilterArgs {
    pub fn resolve(&self, default: ReviewPeriod) -> DashResult<TransactionFilters> {
        Ok(TransactionFilters::for_period(self.period.resolve(default)?)
            .with_search(self.search.clone())
            .with_category(self.category.clone())
            .with_bank(self.bank.clone()))
    }
}
