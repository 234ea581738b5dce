//! Task domain model
//!
//! Pure domain logic for task management with no I/O operations.

use chrono::{DateTime, Local};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{CoreError, Result};

/// Maximum task text length, in characters, after trimming
pub const MAX_TEXT_LEN: usize = 200;

/// Category given to tasks when none is chosen
pub const DEFAULT_CATEGORY: &str = "personal";

// Tag pattern: #word (alphanumeric and underscores)
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#(\w+)").expect("Invalid tag regex pattern")
});

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank, higher is more urgent
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(CoreError::validation(
                "priority",
                format!("'{}' is not one of high, medium, low", other),
            )),
        }
    }
}

/// Rough effort label derived from the word count of the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Estimate {
    #[serde(rename = "< 15 min")]
    Quick,
    #[serde(rename = "15-30 min")]
    Moderate,
    #[serde(rename = "30+ min")]
    Long,
}

impl Estimate {
    /// Estimate from text; words are the pieces between single spaces
    pub fn from_text(text: &str) -> Self {
        let words = text.split(' ').count();
        if words > 10 {
            Self::Long
        } else if words > 5 {
            Self::Moderate
        } else {
            Self::Quick
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Quick => "< 15 min",
            Self::Moderate => "15-30 min",
            Self::Long => "30+ min",
        }
    }
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Extract `#tag` words from text, in order of appearance
pub fn extract_tags(text: &str) -> Vec<String> {
    TAG_REGEX
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Trim text and check it fits the length bounds
pub fn normalize_text(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation("text", "Please enter a task"));
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(CoreError::validation(
            "text",
            format!("Task is too long, maximum {} characters", MAX_TEXT_LEN),
        ));
    }
    Ok(trimmed.to_string())
}

/// A single task
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u32,
    pub text: String,
    pub priority: Priority,
    pub category: String,
    pub completed: bool,
    pub created_at: DateTime<Local>,
    pub completed_at: Option<DateTime<Local>>,
    /// Tags found in the text (without # prefix)
    #[serde(default)]
    pub tags: Vec<String>,
    /// Fixed at creation, edits leave it alone
    pub estimated_time: Estimate,
}

impl Task {
    /// Create a new open task; tags and estimate are derived from the text
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id,
            tags: extract_tags(&text),
            estimated_time: Estimate::from_text(&text),
            text,
            priority: Priority::default(),
            category: DEFAULT_CATEGORY.to_string(),
            completed: false,
            created_at: Local::now(),
            completed_at: None,
        }
    }

    /// Builder method to set priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Builder method to set category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder method to set the creation time
    pub fn with_created_at(mut self, created_at: DateTime<Local>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Flip completion, stamping or clearing `completed_at`
    pub fn toggle_complete(&mut self, now: DateTime<Local>) {
        self.completed = !self.completed;
        self.completed_at = self.completed.then_some(now);
    }

    /// Replace the text and re-derive tags
    pub fn set_text(&mut self, text: String) {
        self.tags = extract_tags(&text);
        self.text = text;
    }

    /// Check the record invariants, used when loading saved state
    pub fn validate(&self) -> Result<()> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_TEXT_LEN {
            return Err(CoreError::corrupt(format!(
                "task #{} has text outside 1..={} characters",
                self.id, MAX_TEXT_LEN
            )));
        }
        if self.completed != self.completed_at.is_some() {
            return Err(CoreError::corrupt(format!(
                "task #{} completion flag disagrees with completedAt",
                self.id
            )));
        }
        Ok(())
    }

    fn same_text(&self, text_lower: &str) -> bool {
        self.text.to_lowercase() == text_lower
    }
}

/// In-memory ordered list of tasks, newest first
///
/// Ids come from a high-water mark so a deleted id is never handed out again
/// during the session.
#[derive(Debug, Default, Clone)]
pub struct TaskList {
    tasks: Vec<Task>,
    high_water: u32,
}

impl TaskList {
    /// Create a new empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from saved records, validating every one
    pub fn from_saved(tasks: Vec<Task>, saved_counter: u32) -> Result<Self> {
        let mut seen = HashSet::new();
        for task in &tasks {
            task.validate()?;
            if !seen.insert(task.id) {
                return Err(CoreError::corrupt(format!("duplicate task id #{}", task.id)));
            }
        }

        let max_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        Ok(Self {
            tasks,
            high_water: max_id.max(saved_counter),
        })
    }

    /// All tasks in list order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Highest id handed out so far
    pub fn high_water(&self) -> u32 {
        self.high_water
    }

    /// Count total tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if list is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Count completed tasks
    pub fn count_completed(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Get a task by ID
    pub fn get(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get or return error if task not found
    pub fn get_or_err(&self, id: u32) -> Result<&Task> {
        self.get(id).ok_or(CoreError::TaskNotFound(id))
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    fn position_or_err(&self, id: u32) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(CoreError::TaskNotFound(id))
    }

    fn ensure_unique(&self, text: &str, except: Option<u32>) -> Result<()> {
        let lower = text.to_lowercase();
        let clash = self
            .tasks
            .iter()
            .any(|t| !t.completed && Some(t.id) != except && t.same_text(&lower));
        if clash {
            return Err(CoreError::Duplicate(text.to_string()));
        }
        Ok(())
    }

    /// Add a new task at the head of the list
    pub fn create(
        &mut self,
        text: &str,
        priority: Priority,
        category: &str,
    ) -> Result<&Task> {
        self.create_at(text, priority, category, Local::now())
    }

    /// Add a new task with an explicit creation time
    pub fn create_at(
        &mut self,
        text: &str,
        priority: Priority,
        category: &str,
        now: DateTime<Local>,
    ) -> Result<&Task> {
        let text = normalize_text(text)?;
        self.ensure_unique(&text, None)?;

        let category = match category.trim() {
            "" => DEFAULT_CATEGORY,
            c => c,
        };

        self.high_water += 1;
        let task = Task::new(self.high_water, text)
            .with_priority(priority)
            .with_category(category)
            .with_created_at(now);

        self.tasks.insert(0, task);
        Ok(&self.tasks[0])
    }

    /// Toggle completion status
    pub fn toggle_complete(&mut self, id: u32) -> Result<&Task> {
        self.toggle_complete_at(id, Local::now())
    }

    /// Toggle completion status with an explicit completion time
    pub fn toggle_complete_at(&mut self, id: u32, now: DateTime<Local>) -> Result<&Task> {
        let pos = self.position_or_err(id)?;
        self.tasks[pos].toggle_complete(now);
        Ok(&self.tasks[pos])
    }

    /// Replace a task's text; priority, category and estimate stay as they were
    pub fn edit(&mut self, id: u32, new_text: &str) -> Result<&Task> {
        let pos = self.position_or_err(id)?;
        let text = normalize_text(new_text)?;
        if !self.tasks[pos].completed {
            self.ensure_unique(&text, Some(id))?;
        }

        self.tasks[pos].set_text(text);
        Ok(&self.tasks[pos])
    }

    /// Remove a task by ID
    pub fn remove(&mut self, id: u32) -> Result<Task> {
        let pos = self.position_or_err(id)?;
        Ok(self.tasks.remove(pos))
    }

    /// Remove every task whose id is in `ids`, returns count removed
    pub fn bulk_remove(&mut self, ids: &HashSet<u32>) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !ids.contains(&t.id));
        before - self.tasks.len()
    }

    /// Remove all completed tasks, returns their ids
    pub fn clear_completed(&mut self) -> Vec<u32> {
        let removed: Vec<u32> = self
            .tasks
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.id)
            .collect();
        self.tasks.retain(|t| !t.completed);
        removed
    }

    #[cfg(test)]
    pub(crate) fn get_mut(&mut self, id: u32) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}
