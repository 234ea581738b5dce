//! Summary counters and the completion streak

use chrono::{Days, NaiveDate};
use std::collections::HashSet;

use crate::date::local_day;
use crate::task::Task;

/// Days examined before today when counting a streak
pub const STREAK_LOOKBACK_DAYS: u32 = 30;

/// Aggregate numbers shown alongside the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    /// Rounded percentage, 0 for an empty list
    pub completion_rate: u32,
    pub streak: u32,
}

impl Stats {
    pub fn collect(tasks: &[Task], today: NaiveDate) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let completion_rate = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        };

        Self {
            total,
            completed,
            remaining: total - completed,
            completion_rate,
            streak: streak(tasks, today),
        }
    }
}

/// Consecutive days, ending today, with at least one completion
///
/// Zero unless something was completed today; at most
/// `STREAK_LOOKBACK_DAYS` days before today are examined.
pub fn streak(tasks: &[Task], today: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = tasks
        .iter()
        .filter(|t| t.completed)
        .filter_map(|t| t.completed_at.as_ref().map(local_day))
        .collect();

    if !days.contains(&today) {
        return 0;
    }

    let mut count = 1;
    for back in 1..=STREAK_LOOKBACK_DAYS {
        match today.checked_sub_days(Days::new(back as u64)) {
            Some(day) if days.contains(&day) => count += 1,
            _ => break,
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, TaskList};
    use chrono::{Duration, Local};

    fn completed_days_ago(list: &mut TaskList, offsets: &[i64]) {
        let now = Local::now();
        for (i, offset) in offsets.iter().enumerate() {
            let id = list
                .create(&format!("Task {}", i), Priority::Low, "work")
                .unwrap()
                .id;
            list.toggle_complete_at(id, now - Duration::days(*offset))
                .unwrap();
        }
    }

    #[test]
    fn test_streak_zero_without_today() {
        let mut list = TaskList::new();
        completed_days_ago(&mut list, &[1, 2, 3]);

        assert_eq!(streak(list.tasks(), Local::now().date_naive()), 0);
    }

    #[test]
    fn test_streak_today_only() {
        let mut list = TaskList::new();
        completed_days_ago(&mut list, &[0]);
        list.create("Still open", Priority::Low, "work").unwrap();

        assert_eq!(streak(list.tasks(), Local::now().date_naive()), 1);
    }

    #[test]
    fn test_streak_stops_at_gap() {
        let mut list = TaskList::new();
        completed_days_ago(&mut list, &[0, 0, 1, 2, 4]);

        assert_eq!(streak(list.tasks(), Local::now().date_naive()), 3);
    }

    #[test]
    fn test_streak_is_capped() {
        let mut list = TaskList::new();
        let offsets: Vec<i64> = (0..60).collect();
        completed_days_ago(&mut list, &offsets);

        assert_eq!(
            streak(list.tasks(), Local::now().date_naive()),
            STREAK_LOOKBACK_DAYS + 1
        );
    }

    #[test]
    fn test_reopened_task_does_not_count() {
        let mut list = TaskList::new();
        completed_days_ago(&mut list, &[0]);
        if let Some(task) = list.get_mut(1) {
            task.completed = false;
            task.completed_at = None;
        }

        assert_eq!(streak(list.tasks(), Local::now().date_naive()), 0);
    }

    #[test]
    fn test_stats_rate() {
        let mut list = TaskList::new();
        completed_days_ago(&mut list, &[0]);
        list.create("Open 1", Priority::Low, "work").unwrap();
        list.create("Open 2", Priority::Low, "work").unwrap();

        let stats = Stats::collect(list.tasks(), Local::now().date_naive());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.remaining, 2);
        assert_eq!(stats.completion_rate, 33);
        assert_eq!(stats.streak, 1);

        assert_eq!(Stats::collect(&[], Local::now().date_naive()), Stats::default());
    }
}
