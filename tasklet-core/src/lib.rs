//! Tasklet Core - domain logic for a personal task list
//!
//! This crate performs no I/O of its own. Persistence goes through the
//! `KeyValueStore` trait, implemented by adapters in consuming crates.

pub mod date;
pub mod error;
pub mod filter;
pub mod prefs;
pub mod selection;
pub mod stats;
pub mod storage;
pub mod store;
pub mod task;

pub use error::{CoreError, Result};
pub use filter::{FilterExt, StatusFilter, TaskQuery, TaskSort};
pub use prefs::{Preferences, Theme};
pub use selection::Selection;
pub use stats::Stats;
pub use storage::{KeyValueStore, MemoryStore};
pub use store::{Escaped, SavePolicy, TaskStore};
pub use task::{Estimate, Priority, Task, TaskList};
