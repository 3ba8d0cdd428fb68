//! Preference CLI commands

use clap::Subcommand;

use super::{CliContext, PeriodArgs};
use crate::error::DashResult;
use crate::session::{Preferences, Toggle};

#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Show current preferences
    Show,
    /// Flip a dashboard toggle
    Toggle {
        /// budget-vs-actual, category-breakdown or savings-goals
        key: Toggle,
    },
    /// Set the selected month
    Period {
        /// Period as YYYY-MM
        #[arg(conflicts_with_all = ["month", "year"])]
        period: Option<String>,
        #[command(flatten)]
        args: PeriodArgs,
    },
    /// Restore defaults
    Reset,
}

pub fn format_preferences(prefs: &Preferences) -> String {
    let mut output = String::new();
    for toggle in Toggle::ALL {
        output.push_str(&format!(
            "{:<20} {:<4} {}\n",
            toggle.to_string(),
            if prefs.is_enabled(toggle) { "on" } else { "off" },
            toggle.description()
        ));
    }
    output.push_str(&format!("{:<20} {}\n", "period", prefs.period().label()));
    output
}

pub fn handle_prefs_command(ctx: &mut CliContext, cmd: PrefsCommands) -> DashResult<()> {
    match cmd {
        PrefsCommands::Show => {
            print!("{}", format_preferences(&ctx.session.preferences));
        }
        PrefsCommands::Toggle { key } => {
            let enabled = ctx.session.toggle(key)?;
            println!("{}: {}", key.label(), if enabled { "on" } else { "off" });
        }
        PrefsCommands::Period { period, args } => {
            let period = match period {
                Some(raw) => crate::models::ReviewPeriod::parse(&raw)?,
                None => args.resolve(ctx.session.period())?,
            };
            ctx.session.set_period(period)?;
            println!("Selected period: {}", period.label());
        }
        PrefsCommands::Reset => {
            ctx.session.reset_preferences()?;
            println!("Preferences reset to defaults.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_preferences() {
        let prefs = Preferences {
            show_savings_goals: false,
            selected_month: 4,
            selected_year: 2025,
            ..Preferences::default()
        };
        let out = format_preferences(&prefs);
        assert!(out.contains("budget-vs-actual     on"));
        assert!(out.contains("savings-goals        off"));
        assert!(out.contains("April 2025"));
    }
}
