//! Task filtering, searching and sorting
//!
//! Provides a builder-style query over the task list. Every sort puts open
//! tasks ahead of completed ones before applying its own key.

use std::cmp::Ordering;
use std::str::FromStr;

use deunicode::deunicode;

use crate::error::{CoreError, Result};
use crate::task::{Task, TaskList};

/// Completion-status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(CoreError::validation(
                "filter",
                format!("unknown filter '{}'", other),
            )),
        }
    }
}

/// Sort order for tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSort {
    /// Newest first
    #[default]
    Date,
    /// High before medium before low
    Priority,
    Alphabetical,
    Category,
}

impl TaskSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Priority => "priority",
            Self::Alphabetical => "alphabetical",
            Self::Category => "category",
        }
    }

    /// Compare two tasks under this sort's secondary key
    fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::Date => b.created_at.cmp(&a.created_at),
            Self::Priority => b.priority.rank().cmp(&a.priority.rank()),
            Self::Alphabetical => collate(&a.text, &b.text),
            Self::Category => collate(&a.category, &b.category),
        }
    }
}

impl std::fmt::Display for TaskSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskSort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "priority" => Ok(Self::Priority),
            "alphabetical" => Ok(Self::Alphabetical),
            "category" => Ok(Self::Category),
            other => Err(CoreError::validation(
                "sort",
                format!("unknown sort '{}'", other),
            )),
        }
    }
}

/// Accent- and case-folded comparison with the raw strings as tie-break
///
/// `Éclair` sorts with the e's, and `cafe` lands just before `café`.
pub fn collate(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

fn fold(s: &str) -> String {
    deunicode(s).to_lowercase()
}

/// Builder for task queries
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub status: StatusFilter,
    /// Search term, matched case-insensitively against text, category,
    /// priority and tags
    pub search: Option<String>,
    pub sort: TaskSort,
}

impl TaskQuery {
    /// Create a new query with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter to only show open tasks
    pub fn active(mut self) -> Self {
        self.status = StatusFilter::Active;
        self
    }

    /// Filter to only show completed tasks
    pub fn completed(mut self) -> Self {
        self.status = StatusFilter::Completed;
        self
    }

    /// Set status filter
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Filter by search term
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Set search term
    pub fn with_search(mut self, term: Option<String>) -> Self {
        self.search = term;
        self
    }

    /// Sort by given key
    pub fn sort_by(mut self, sort: TaskSort) -> Self {
        self.sort = sort;
        self
    }

    /// Check if a task passes the status filter and search term
    pub fn matches(&self, task: &Task) -> bool {
        if !self.status.matches(task) {
            return false;
        }

        match self.search.as_deref() {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                task.text.to_lowercase().contains(&term)
                    || task.category.to_lowercase().contains(&term)
                    || task.priority.as_str().contains(&term)
                    || task.tags.iter().any(|t| t.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }

    /// Apply filter and sort to a sequence of tasks
    ///
    /// The sort is stable, so equal keys keep their list order.
    pub fn apply<'a>(&self, tasks: impl Iterator<Item = &'a Task>) -> Vec<&'a Task> {
        let mut filtered: Vec<&Task> = tasks.filter(|t| self.matches(t)).collect();

        filtered.sort_by(|a, b| {
            a.completed
                .cmp(&b.completed)
                .then_with(|| self.sort.compare(a, b))
        });

        filtered
    }
}

/// Extension trait for TaskList to support querying
pub trait FilterExt {
    /// Get tasks filtered and sorted according to the query
    fn query(&self, query: &TaskQuery) -> Vec<&Task>;
}

impl FilterExt for TaskList {
    fn query(&self, query: &TaskQuery) -> Vec<&Task> {
        query.apply(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use chrono::{Duration, Local};

    fn ids(tasks: &[&Task]) -> Vec<u32> {
        tasks.iter().map(|t| t.id).collect()
    }

    /// Tasks 1..=n created one minute apart, oldest first
    fn list_of(texts: &[(&str, Priority, &str)]) -> TaskList {
        let start = Local::now() - Duration::hours(1);
        let mut list = TaskList::new();
        for (i, (text, priority, category)) in texts.iter().enumerate() {
            list.create_at(text, *priority, category, start + Duration::minutes(i as i64))
                .unwrap();
        }
        list
    }

    #[test]
    fn test_filter_status() {
        let mut list = list_of(&[
            ("Task 1", Priority::Low, "work"),
            ("Task 2", Priority::Low, "work"),
        ]);
        list.toggle_complete(1).unwrap();

        let done = list.query(&TaskQuery::new().completed());
        assert_eq!(ids(&done), vec![1]);

        let open = list.query(&TaskQuery::new().active());
        assert_eq!(ids(&open), vec![2]);
        assert!(open.iter().all(|t| !t.completed));

        assert_eq!(list.query(&TaskQuery::new()).len(), 2);
    }

    #[test]
    fn test_search_fields() {
        let list = list_of(&[
            ("Buy groceries", Priority::Low, "shopping"),
            ("Call mom", Priority::High, "family"),
            ("Plan sprint #Roadmap", Priority::Medium, "work"),
        ]);

        assert_eq!(ids(&list.query(&TaskQuery::new().search("BUY"))), vec![1]);
        assert_eq!(ids(&list.query(&TaskQuery::new().search("fam"))), vec![2]);
        assert_eq!(ids(&list.query(&TaskQuery::new().search("high"))), vec![2]);
        assert_eq!(ids(&list.query(&TaskQuery::new().search("roadmap"))), vec![3]);
        assert_eq!(list.query(&TaskQuery::new().search("")).len(), 3);
        assert!(list.query(&TaskQuery::new().search("zzz")).is_empty());
    }

    #[test]
    fn test_sort_by_priority() {
        let list = list_of(&[
            ("Buy milk", Priority::Low, "personal"),
            ("File taxes", Priority::High, "personal"),
        ]);

        let results = list.query(&TaskQuery::new().sort_by(TaskSort::Priority));
        assert_eq!(ids(&results), vec![2, 1]);
    }

    #[test]
    fn test_sort_by_date_puts_completed_last() {
        let mut list = list_of(&[
            ("Task 1", Priority::Low, "work"),
            ("Task 2", Priority::Low, "work"),
            ("Task 3", Priority::Low, "work"),
            ("Task 4", Priority::Low, "work"),
        ]);
        list.toggle_complete(4).unwrap();
        list.toggle_complete(2).unwrap();

        let results = list.query(&TaskQuery::new());
        assert_eq!(ids(&results), vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_sort_alphabetical_ignores_case() {
        let list = list_of(&[
            ("zebra", Priority::Low, "work"),
            ("Apple", Priority::Low, "work"),
            ("mango", Priority::Low, "work"),
        ]);

        let results = list.query(&TaskQuery::new().sort_by(TaskSort::Alphabetical));
        let texts: Vec<&str> = results.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Apple", "mango", "zebra"]);
    }

    #[test]
    fn test_sort_alphabetical_folds_accents() {
        let list = list_of(&[
            ("zebra", Priority::Low, "work"),
            ("Éclair", Priority::Low, "work"),
            ("apple", Priority::Low, "work"),
        ]);

        let results = list.query(&TaskQuery::new().sort_by(TaskSort::Alphabetical));
        let texts: Vec<&str> = results.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["apple", "Éclair", "zebra"]);
    }

    #[test]
    fn test_collate_accents_and_ties() {
        assert_eq!(collate("Über", "vase"), Ordering::Less);
        assert_eq!(collate("cafe", "café"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_sort_category_is_stable() {
        let list = list_of(&[
            ("Task 1", Priority::Low, "work"),
            ("Task 2", Priority::Low, "home"),
            ("Task 3", Priority::Low, "work"),
        ]);

        // list order is newest first: 3, 2, 1
        let results = list.query(&TaskQuery::new().sort_by(TaskSort::Category));
        assert_eq!(ids(&results), vec![2, 3, 1]);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Active".parse::<StatusFilter>().unwrap(), StatusFilter::Active);
        assert_eq!("alphabetical".parse::<TaskSort>().unwrap(), TaskSort::Alphabetical);
        assert!("newest".parse::<TaskSort>().is_err());
    }
}
