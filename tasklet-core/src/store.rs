//! Task store
//!
//! Owns the task list, the bulk selection and the view preferences, and is
//! the only place that decides when state is written to the key-value store.
//! Every mutation is funnelled through a method here; on success the list is
//! saved, on error nothing changed.
//!
//! Saves are best-effort. A failing backend is logged and otherwise ignored,
//! the in-memory list stays authoritative for the session.

use chrono::Local;
use std::collections::HashSet;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::error::{CoreError, Result};
use crate::filter::{FilterExt, StatusFilter, TaskQuery, TaskSort};
use crate::prefs::{Preferences, Theme};
use crate::selection::Selection;
use crate::stats::{self, Stats};
use crate::storage::{
    COUNTER_KEY, FILTER_KEY, KeyValueStore, SORT_KEY, TASKS_KEY, THEME_KEY,
};
use crate::task::{Priority, Task, TaskList};

/// When the store flushes on its own, outside of mutations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavePolicy {
    /// Save at least this often while ticking
    pub interval: Duration,
    /// Save once input has been quiet for this long
    pub debounce: Duration,
}

impl Default for SavePolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            debounce: Duration::from_millis(1000),
        }
    }
}

/// What `escape` cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escaped {
    Search,
    Selection,
    Nothing,
}

pub struct TaskStore<S: KeyValueStore> {
    list: TaskList,
    selection: Selection,
    prefs: Preferences,
    search: Option<String>,
    storage: S,
    policy: SavePolicy,
    last_save: Instant,
    pending_input: Option<Instant>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Load the saved list and preferences from `storage`
    ///
    /// Fails with `CorruptState` when the saved list can't be parsed or
    /// breaks a task invariant. Unreadable preferences fall back to defaults.
    pub fn open(storage: S, policy: SavePolicy) -> Result<Self> {
        let list = load_list(&storage)?;
        let prefs = Preferences {
            filter: read_pref::<StatusFilter, _>(&storage, FILTER_KEY),
            sort: read_pref::<TaskSort, _>(&storage, SORT_KEY),
            theme: read_pref::<Theme, _>(&storage, THEME_KEY),
        };
        debug!(tasks = list.len(), high_water = list.high_water(), "store opened");

        Ok(Self {
            list,
            selection: Selection::new(),
            prefs,
            search: None,
            storage,
            policy,
            last_save: Instant::now(),
            pending_input: None,
        })
    }

    /// Final save, hands the backend back
    pub fn close(mut self) -> S {
        self.save();
        self.save_preferences();
        self.storage
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    pub fn tasks(&self) -> &[Task] {
        self.list.tasks()
    }

    pub fn get(&self, id: u32) -> Option<&Task> {
        self.list.get(id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    // ---- mutations ----

    pub fn create(&mut self, text: &str, priority: Priority, category: &str) -> Result<Task> {
        let task = self.list.create(text, priority, category)?.clone();
        debug!(id = task.id, "task created");
        self.save();
        Ok(task)
    }

    pub fn toggle_complete(&mut self, id: u32) -> Result<Task> {
        let task = self.list.toggle_complete(id)?.clone();
        debug!(id, completed = task.completed, "task toggled");
        self.save();
        Ok(task)
    }

    pub fn edit(&mut self, id: u32, new_text: &str) -> Result<Task> {
        let task = self.list.edit(id, new_text)?.clone();
        debug!(id, "task edited");
        self.save();
        Ok(task)
    }

    pub fn remove(&mut self, id: u32) -> Result<Task> {
        let task = self.list.remove(id)?;
        self.selection.prune(&[id]);
        debug!(id, "task removed");
        self.save();
        Ok(task)
    }

    /// Remove every listed task that exists, returns how many went
    ///
    /// Zero means there was nothing to do and nothing was saved.
    pub fn bulk_remove(&mut self, ids: &HashSet<u32>) -> usize {
        let removed = self.list.bulk_remove(ids);
        self.selection.prune(ids);
        if removed > 0 {
            debug!(removed, "tasks removed in bulk");
            self.save();
        }
        removed
    }

    /// Remove all completed tasks, returns how many went
    pub fn clear_completed(&mut self) -> usize {
        let removed = self.list.clear_completed();
        if removed.is_empty() {
            return 0;
        }
        self.selection.prune(&removed);
        debug!(removed = removed.len(), "completed tasks cleared");
        self.save();
        removed.len()
    }

    // ---- selection ----

    /// Flip selection of one task, returns whether it is now selected
    pub fn toggle_selection(&mut self, id: u32) -> Result<bool> {
        if !self.list.contains(id) {
            return Err(CoreError::TaskNotFound(id));
        }
        Ok(self.selection.toggle(id))
    }

    /// Select all visible tasks, or deselect them if they all are
    pub fn toggle_select_all(&mut self) {
        let visible: Vec<u32> = self.visible().iter().map(|t| t.id).collect();
        self.selection.toggle_all(&visible);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Delete every selected task and empty the selection
    pub fn delete_selected(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        let ids = self.selection.ids().clone();
        let removed = self.bulk_remove(&ids);
        self.selection.clear();
        removed
    }

    // ---- views ----

    /// Filter, search and sort without touching state
    pub fn query(&self, query: &TaskQuery) -> Vec<&Task> {
        self.list.query(query)
    }

    /// The query built from the current filter, search and sort
    pub fn current_query(&self) -> TaskQuery {
        TaskQuery::new()
            .with_status(self.prefs.filter)
            .with_search(self.search.clone())
            .sort_by(self.prefs.sort)
    }

    pub fn visible(&self) -> Vec<&Task> {
        self.query(&self.current_query())
    }

    pub fn stats(&self) -> Stats {
        Stats::collect(self.list.tasks(), Local::now().date_naive())
    }

    pub fn streak(&self) -> u32 {
        stats::streak(self.list.tasks(), Local::now().date_naive())
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.prefs.filter = filter;
        self.save_preferences();
    }

    pub fn set_sort(&mut self, sort: TaskSort) {
        self.prefs.sort = sort;
        self.save_preferences();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.prefs.theme = self.prefs.theme.toggled();
        self.save_preferences();
        self.prefs.theme
    }

    /// Set the session search term, blank clears it
    pub fn set_search(&mut self, term: &str) {
        self.search = Some(term.to_lowercase()).filter(|t| !t.is_empty());
    }

    pub fn clear_search(&mut self) {
        self.search = None;
    }

    /// Clear the search if there is one, otherwise the selection
    pub fn escape(&mut self) -> Escaped {
        if self.search.is_some() {
            self.search = None;
            Escaped::Search
        } else if !self.selection.is_empty() {
            self.selection.clear();
            Escaped::Selection
        } else {
            Escaped::Nothing
        }
    }

    // ---- persistence ----

    /// Record user input; a save follows once input goes quiet
    pub fn note_input(&mut self, now: Instant) {
        self.pending_input = Some(now);
    }

    /// Run the periodic and debounced saves, returns whether one happened
    pub fn tick(&mut self, now: Instant) -> bool {
        let debounced = self
            .pending_input
            .is_some_and(|at| now.saturating_duration_since(at) >= self.policy.debounce);
        let periodic = now.saturating_duration_since(self.last_save) >= self.policy.interval;

        if !(debounced || periodic) {
            return false;
        }
        debug!(debounced, periodic, "autosave");
        let saved = self.write_tasks();
        self.last_save = now;
        self.pending_input = None;
        saved
    }

    /// Write the task list and id counter now, returns whether it stuck
    pub fn save(&mut self) -> bool {
        let saved = self.write_tasks();
        self.last_save = Instant::now();
        self.pending_input = None;
        saved
    }

    fn write_tasks(&mut self) -> bool {
        let json = match serde_json::to_string(self.list.tasks()) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "could not serialize tasks");
                return false;
            }
        };

        let counter = self.list.high_water().to_string();
        let result = self
            .storage
            .set(TASKS_KEY, &json)
            .and_then(|()| self.storage.set(COUNTER_KEY, &counter));

        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "saving tasks failed, keeping in-memory state");
                false
            }
        }
    }

    fn save_preferences(&mut self) {
        let entries = [
            (FILTER_KEY, self.prefs.filter.as_str()),
            (SORT_KEY, self.prefs.sort.as_str()),
            (THEME_KEY, self.prefs.theme.as_str()),
        ];
        for (key, value) in entries {
            if let Err(e) = self.storage.set(key, value) {
                warn!(key, error = %e, "saving preference failed");
            }
        }
    }
}

fn load_list<S: KeyValueStore>(storage: &S) -> Result<TaskList> {
    let tasks: Vec<Task> = match storage.get(TASKS_KEY)? {
        Some(raw) => serde_json::from_str::<Option<Vec<Task>>>(&raw)
            .map_err(|e| CoreError::corrupt_with_source("saved tasks are not a task array", e))?
            .unwrap_or_default(),
        None => Vec::new(),
    };

    let counter = match storage.get(COUNTER_KEY)? {
        Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
            CoreError::corrupt_with_source("saved task counter is not a number", e)
        })?,
        None => 0,
    };

    TaskList::from_saved(tasks, counter)
}

fn read_pref<T, S>(storage: &S, key: &str) -> T
where
    T: FromStr<Err = CoreError> + Default,
    S: KeyValueStore,
{
    match storage.get(key) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
            warn!(key, error = %e, "ignoring saved preference");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key, error = %e, "could not read preference");
            T::default()
        }
    }
}
