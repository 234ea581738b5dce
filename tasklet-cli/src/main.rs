use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tasklet_core::{Priority, TaskStore};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::display::{DisplayMode, format_summary, format_task, supports_color};
use crate::error::Result;
use crate::shell::Shell;
use crate::storage::FileStore;

mod cli;
mod config;
mod display;
mod error;
mod prompt;
mod shell;
mod storage;

fn init_tracing() {
    // Off unless RUST_LOG asks for it; a bad filter is ignored
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let cfg = Config::load(cli.config.as_ref())?;
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.data_directory));
    let storage = FileStore::open(&data_dir)?;
    tracing::debug!(data_dir = %storage.dir().display(), "opening task store");
    let mut store = TaskStore::open(storage, cfg.save_policy())?;

    match cli.command {
        Commands::Add {
            text,
            priority,
            category,
        } => {
            let priority = match priority {
                Some(level) => Priority::from(level),
                None => cfg.default_priority()?,
            };
            let category = category.unwrap_or_else(|| cfg.default_category.clone());

            let task = store.create(&text.join(" "), priority, &category)?;
            println!("Task added: [{}] {}", task.id, task.text);
        }

        Commands::List {
            filter,
            sort,
            search,
            compact,
            detailed,
            no_color,
        } => {
            if let Some(filter) = filter {
                store.set_filter(filter.into());
            }
            if let Some(sort) = sort {
                store.set_sort(sort.into());
            }
            if let Some(term) = search {
                store.set_search(&term);
            }

            let tasks = store.visible();
            if tasks.is_empty() {
                println!("No tasks found.");
            } else {
                let mode = if compact {
                    DisplayMode::Compact
                } else if detailed {
                    DisplayMode::Detailed
                } else {
                    DisplayMode::Default
                };

                let use_color = !no_color && supports_color();
                let now = Local::now();

                for task in &tasks {
                    println!("{}", format_task(task, mode, use_color, now));
                }

                println!();
                println!("{}", format_summary(&store.stats(), use_color));
            }
        }

        Commands::Check { id } => {
            let task = store.toggle_complete(id)?;
            let status = if task.completed { "done" } else { "open" };
            println!("Marked task #{} as {}: {}", task.id, status, task.text);
        }

        Commands::Edit { id, text } => {
            let task = store.edit(id, &text.join(" "))?;
            println!("Updated task #{}: {}", task.id, task.text);
        }

        Commands::Remove { id, force } => {
            let text = store.list().get_or_err(id)?.text.clone();

            if !force && !confirm(&format!("Delete \"{}\"?", text))? {
                println!("Cancelled.");
                return Ok(());
            }

            let removed = store.remove(id)?;
            println!("Removed: {}", removed.text);
        }

        Commands::Delete { ids, force } => {
            let ids: HashSet<u32> = ids.into_iter().collect();
            let present = ids.iter().filter(|id| store.list().contains(**id)).count();

            if present == 0 {
                println!("No matching tasks to delete.");
                return Ok(());
            }

            if !force && !confirm(&format!("Delete {} selected task(s)?", present))? {
                println!("Cancelled.");
                return Ok(());
            }

            let removed = store.bulk_remove(&ids);
            println!("Removed {} task(s).", removed);
        }

        Commands::Clear { force } => {
            let count = store.list().count_completed();

            if count == 0 {
                println!("No completed tasks to clear.");
                return Ok(());
            }

            if !force && !confirm(&format!("Clear {} completed task(s)?", count))? {
                println!("Cancelled.");
                return Ok(());
            }

            let removed = store.clear_completed();
            println!("Removed {} completed task(s).", removed);
        }

        Commands::Stats { no_color } => {
            let use_color = !no_color && supports_color();
            println!("{}", format_summary(&store.stats(), use_color));
        }

        Commands::Theme => {
            let theme = store.toggle_theme();
            println!("{} theme activated.", theme);
        }

        Commands::Shell { no_color } => {
            let use_color = !no_color && supports_color();
            let stdin = io::stdin();
            let mut shell = Shell::new(&mut store, stdin.lock(), io::stdout())
                .with_color(use_color)
                .with_defaults(cfg.default_priority()?, cfg.default_category.clone());
            shell.run()?;
        }
    }

    store.close();
    Ok(())
}

/// Ask user for confirmation on the terminal
fn confirm(prompt: &str) -> Result<bool> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let answer = prompt::confirm(&mut stdin.lock(), &mut stdout, prompt)?;
    stdout.flush()?;
    Ok(answer)
}
