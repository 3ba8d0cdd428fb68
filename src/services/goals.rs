//! Savings goal progress

use crate::models::{Money, SavingsGoal};

/// Whole-number percent complete, capped at 100
///
/// Targets below one unit are treated as one so an empty target never divides
/// by zero.
pub fn progress_percent(goal: &SavingsGoal) -> u16 {
    let target = goal.target.max(Money::from_units(1));
    let ratio = goal.current.as_f64() / target.as_f64();
    (ratio * 100.0).round().clamp(0.0, 100.0) as u16
}

/// Goals with their progress, in server order
pub fn with_progress(goals: &[SavingsGoal]) -> Vec<(&SavingsGoal, u16)> {
    goals.iter().map(|g| (g, progress_percent(g))).collect()
}

pub fn is_reached(goal: &SavingsGoal) -> bool {
    goal.target.is_positive() && goal.current >= goal.target
}

/// History values as whole units for sparkline rendering
pub fn history_values(goal: &SavingsGoal) -> Vec<u64> {
    goal.history
        .iter()
        .map(|h| h.value.clamp_non_negative().units() as u64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalHistoryPoint, GoalId};

    fn goal(target: i64, current: i64) -> SavingsGoal {
        SavingsGoal {
            id: GoalId::new("g1"),
            name: "Holiday".into(),
            target: Money::from_units(target),
            current: Money::from_units(current),
            deadline: None,
            history: vec![
                GoalHistoryPoint {
                    date: "2025-01-01".into(),
                    value: Money::from_units(100),
                },
                GoalHistoryPoint {
                    date: "2025-02-01".into(),
                    value: Money::from_units(-5),
                },
            ],
        }
    }

    #[test]
    fn test_percent_rounds_and_caps() {
        assert_eq!(progress_percent(&goal(300, 100)), 33);
        assert_eq!(progress_percent(&goal(300, 200)), 67);
        assert_eq!(progress_percent(&goal(100, 250)), 100);
    }

    #[test]
    fn test_zero_target_does_not_divide_by_zero() {
        assert_eq!(progress_percent(&goal(0, 0)), 0);
        assert_eq!(progress_percent(&goal(0, 5)), 100);
        assert!(!is_reached(&goal(0, 5)));
    }

    #[test]
    fn test_history_values_clamped() {
        assert_eq!(history_values(&goal(100, 0)), vec![100, 0]);
    }
}
