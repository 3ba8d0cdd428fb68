//! Savings goal formatting

use super::progress_bar;
use crate::models::SavingsGoal;
use crate::services::goals::progress_percent;

pub fn format_goal_list(goals: &[SavingsGoal], currency: &str) -> String {
    if goals.is_empty() {
        return "No savings goals yet.\n".to_string();
    }

    let name_width = goals.iter().map(|g| g.name.chars().count()).max().unwrap_or(4).max(4);
    let mut output = String::new();

    for goal in goals {
        let percent = progress_percent(goal);
        output.push_str(&format!(
            "{:<name_width$}  {} {:>3}%  {} of {}  due {}\n",
            goal.name,
            progress_bar(f64::from(percent) / 100.0, 20),
            percent,
            goal.current.format_with_code(currency),
            goal.target.format_with_code(currency),
            goal.deadline_label(),
            name_width = name_width,
        ));
    }

    output
}
