//! Task display formatting module
//!
//! Handles colored output and different view modes for tasks

use chrono::{DateTime, Local};
use colored::*;

use tasklet_core::date::{format_timestamp, time_ago};
use tasklet_core::{Priority, Stats, Task};

/// Display mode for task list
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayMode {
    /// Minimal one-line format
    Compact,
    /// Every field on its own line
    Detailed,
    /// Balanced view with priority, category and age (default)
    Default,
}

/// Check if terminal supports colors
pub fn supports_color() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn paint_priority(priority: Priority, use_color: bool) -> String {
    let label = priority.as_str();
    if !use_color {
        return label.to_string();
    }
    match priority {
        Priority::High => label.red().bold().to_string(),
        Priority::Medium => label.yellow().to_string(),
        Priority::Low => label.blue().to_string(),
    }
}

fn paint_tag(tag: &str, use_color: bool) -> String {
    let tag = format!("#{}", tag);
    if use_color {
        tag.magenta().to_string()
    } else {
        tag
    }
}

/// Format a task for display
pub fn format_task(task: &Task, mode: DisplayMode, use_color: bool, now: DateTime<Local>) -> String {
    let checkbox = if task.completed { "[✓]" } else { "[ ]" };

    let text = if use_color && task.completed {
        task.text.green().strikethrough().to_string()
    } else {
        task.text.clone()
    };

    match mode {
        DisplayMode::Compact => format!("{} [{}] {}", checkbox, task.id, text),
        DisplayMode::Detailed => {
            let mut parts = vec![
                format!("{} [ID: {}]", checkbox, task.id),
                format!("Text: {}", text),
                format!("Priority: {}", paint_priority(task.priority, use_color)),
                format!("Category: {}", task.category),
            ];

            if !task.tags.is_empty() {
                let tags = task
                    .tags
                    .iter()
                    .map(|t| paint_tag(t, use_color))
                    .collect::<Vec<_>>()
                    .join(" ");
                parts.push(format!("Tags: {}", tags));
            }

            parts.push(format!("Estimate: {}", task.estimated_time));
            parts.push(format!(
                "Created: {} ({})",
                format_timestamp(&task.created_at),
                time_ago(task.created_at, now)
            ));
            match &task.completed_at {
                Some(dt) => parts.push(format!("Completed: {}", format_timestamp(dt))),
                None => parts.push("Status: Open".to_string()),
            }
            parts.join("\n  ")
        }
        DisplayMode::Default => {
            let id_str = if use_color {
                format!("[{}]", task.id).cyan().to_string()
            } else {
                format!("[{}]", task.id)
            };

            let meta = format!(
                "{} · {} · {} · {}",
                paint_priority(task.priority, use_color),
                task.category,
                time_ago(task.created_at, now),
                task.estimated_time
            );
            let meta = if use_color {
                meta.dimmed().to_string()
            } else {
                meta
            };

            format!("{} {} {}  ({})", checkbox, id_str, text, meta)
        }
    }
}

/// Format a summary line for task list
pub fn format_summary(stats: &Stats, use_color: bool) -> String {
    let done = format!("{} done", stats.completed);
    let streak = format!("streak {}", stats.streak);

    let parts = [
        format!("{} total", stats.total),
        if use_color { done.green().to_string() } else { done },
        format!("{} left", stats.remaining),
        format!("{}%", stats.completion_rate),
        if use_color && stats.streak > 0 {
            streak.yellow().to_string()
        } else {
            streak
        },
    ];

    format!("[{}]", parts.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_task_compact() {
        let task = Task::new(1, "Test task");

        let output = format_task(&task, DisplayMode::Compact, false, Local::now());
        assert_eq!(output, "[ ] [1] Test task");
    }

    #[test]
    fn test_format_task_default_meta() {
        let task = Task::new(2, "Ship it")
            .with_priority(Priority::High)
            .with_category("work");

        let output = format_task(&task, DisplayMode::Default, false, Local::now());
        assert!(output.starts_with("[ ] [2] Ship it"));
        assert!(output.contains("high · work · Just now · < 15 min"));
    }

    #[test]
    fn test_format_task_completed_detailed() {
        let mut task = Task::new(3, "Done task #chores");
        task.toggle_complete(Local::now());

        let output = format_task(&task, DisplayMode::Detailed, false, Local::now());
        assert!(output.contains("[✓]"));
        assert!(output.contains("Tags: #chores"));
        assert!(output.contains("Completed: "));
    }

    #[test]
    fn test_tags_are_magenta_in_color() {
        colored::control::set_override(true);
        let task = Task::new(4, "Plan trip #travel");

        let output = format_task(&task, DisplayMode::Detailed, true, Local::now());
        assert!(output.contains(&"#travel".magenta().to_string()));
        assert!(output.contains("\u{1b}[35m#travel"));
    }

    #[test]
    fn test_format_summary() {
        let stats = Stats {
            total: 10,
            completed: 5,
            remaining: 5,
            completion_rate: 50,
            streak: 2,
        };
        assert_eq!(
            format_summary(&stats, false),
            "[10 total | 5 done | 5 left | 50% | streak 2]"
        );
    }
}
