use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use tasklet_core::{Priority, StatusFilter, TaskSort};

#[derive(Parser)]
#[command(name = "tasklet")]
#[command(about = "A small personal task list with tags, priorities and streaks")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = concat!(
    "v",
    env!("CARGO_PKG_VERSION"),
    "\nCodeName: ",
    env!("CODENAME")
))]
pub struct Cli {
    /// Directory holding saved tasks (overrides the config file)
    #[arg(long, global = true, env = "TASKLET_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "TASKLET_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PriorityLevel {
    High,
    Medium,
    Low,
}

impl From<PriorityLevel> for Priority {
    fn from(level: PriorityLevel) -> Self {
        match level {
            PriorityLevel::High => Priority::High,
            PriorityLevel::Medium => Priority::Medium,
            PriorityLevel::Low => Priority::Low,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FilterBy {
    All,
    Active,
    Completed,
}

impl From<FilterBy> for StatusFilter {
    fn from(filter: FilterBy) -> Self {
        match filter {
            FilterBy::All => StatusFilter::All,
            FilterBy::Active => StatusFilter::Active,
            FilterBy::Completed => StatusFilter::Completed,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SortBy {
    Date,
    Priority,
    Alphabetical,
    Category,
}

impl From<SortBy> for TaskSort {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::Date => TaskSort::Date,
            SortBy::Priority => TaskSort::Priority,
            SortBy::Alphabetical => TaskSort::Alphabetical,
            SortBy::Category => TaskSort::Category,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Adds a task (#words in the text become tags)
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Priority (defaults to the configured one)
        #[arg(long, short = 'p', value_enum)]
        priority: Option<PriorityLevel>,
        /// Category for the task
        #[arg(long, short = 'C', value_name = "CATEGORY")]
        category: Option<String>,
    },

    /// Lists tasks with filtering, search and sorting
    List {
        /// Status filter, remembered for next time
        #[arg(long, short = 'f', value_enum)]
        filter: Option<FilterBy>,
        /// Sort order, remembered for next time
        #[arg(long, value_enum)]
        sort: Option<SortBy>,
        /// Only tasks whose text, category, priority or tags contain TERM
        #[arg(long, short = 's', value_name = "TERM")]
        search: Option<String>,
        /// Use compact one-line format
        #[arg(long, short = 'c')]
        compact: bool,
        /// Use detailed format with full info
        #[arg(long)]
        detailed: bool,
        /// Disable colors
        #[arg(long)]
        no_color: bool,
    },

    /// Toggles task completion status
    Check {
        #[arg(value_parser = clap::value_parser!(u32))]
        id: u32,
    },

    /// Replace a task's text
    Edit {
        #[arg(value_parser = clap::value_parser!(u32))]
        id: u32,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Removes a task
    Remove {
        #[arg(value_parser = clap::value_parser!(u32))]
        id: u32,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Removes several tasks at once
    Delete {
        #[arg(required = true, num_args = 1.., value_parser = clap::value_parser!(u32))]
        ids: Vec<u32>,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Clear completed tasks
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show totals, completion rate and streak
    Stats {
        /// Disable colors
        #[arg(long)]
        no_color: bool,
    },

    /// Switch between light and dark theme
    Theme,

    /// Interactive session with selection and autosave
    Shell {
        /// Disable colors
        #[arg(long)]
        no_color: bool,
    },
}

/// One line typed into the interactive shell
#[derive(Parser)]
#[command(no_binary_name = true, name = "shell", disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand)]
pub enum ShellCommand {
    /// Add a task
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        #[arg(long, short = 'p', value_enum)]
        priority: Option<PriorityLevel>,
        #[arg(long, short = 'C', value_name = "CATEGORY")]
        category: Option<String>,
    },
    /// Show the current view
    #[command(alias = "ls")]
    List,
    /// Toggle completion
    Check { id: u32 },
    /// Replace a task's text
    Edit {
        id: u32,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Remove one task
    #[command(alias = "rm")]
    Remove { id: u32 },
    /// Toggle selection of tasks
    Select {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u32>,
    },
    /// Select every visible task, or deselect them all
    SelectAll,
    /// Remove every selected task
    DeleteSelected,
    /// Remove completed tasks
    Clear,
    /// Change the status filter
    Filter {
        #[arg(value_enum)]
        filter: FilterBy,
    },
    /// Change the sort order
    Sort {
        #[arg(value_enum)]
        sort: SortBy,
    },
    /// Search text, category, priority and tags
    Search {
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },
    /// Clear the search, or the selection when there is no search
    #[command(alias = "esc")]
    Escape,
    /// Show totals and streak
    Stats,
    /// Switch theme
    Theme,
    /// Save now
    Save,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}
