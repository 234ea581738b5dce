//! Interactive shell
//!
//! Keeps one store open for the whole session, so the selection and search
//! survive between commands and the store's autosave gets ticked after every
//! line.

use std::io::{BufRead, Write};
use std::time::Instant;

use chrono::Local;
use clap::Parser;
use tracing::debug;

use tasklet_core::{Escaped, KeyValueStore, Priority, TaskStore};

use crate::cli::{ShellCommand, ShellLine};
use crate::display::{DisplayMode, format_summary, format_task};
use crate::error::Result;
use crate::prompt::confirm;

enum Flow {
    Continue,
    Quit,
}

pub struct Shell<'a, S: KeyValueStore, R: BufRead, W: Write> {
    store: &'a mut TaskStore<S>,
    input: R,
    out: W,
    use_color: bool,
    default_priority: Priority,
    default_category: String,
}

impl<'a, S: KeyValueStore, R: BufRead, W: Write> Shell<'a, S, R, W> {
    pub fn new(store: &'a mut TaskStore<S>, input: R, out: W) -> Self {
        Self {
            store,
            input,
            out,
            use_color: false,
            default_priority: Priority::default(),
            default_category: tasklet_core::task::DEFAULT_CATEGORY.to_string(),
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_defaults(mut self, priority: Priority, category: impl Into<String>) -> Self {
        self.default_priority = priority;
        self.default_category = category.into();
        self
    }

    /// Read and run commands until `quit` or end of input
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.out, "tasklet shell, type 'help' for commands")?;

        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if let Flow::Quit = self.handle_line(&line, Instant::now())? {
                break;
            }
        }

        Ok(())
    }

    /// Run one input line that arrived at `now`
    ///
    /// Autosave is ticked before the line is recorded as input, so the quiet
    /// time since the previous line counts toward the debounce.
    fn handle_line(&mut self, line: &str, now: Instant) -> Result<Flow> {
        if self.store.tick(now) {
            debug!("shell autosave");
        }
        self.store.note_input(now);

        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(Flow::Continue);
        }
        match ShellLine::try_parse_from(words) {
            Ok(parsed) => match self.execute(parsed.command) {
                Ok(flow) => return Ok(flow),
                Err(e) => writeln!(self.out, "error: {}", e)?,
            },
            // covers `help` as well as usage mistakes
            Err(e) => write!(self.out, "{}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn execute(&mut self, command: ShellCommand) -> Result<Flow> {
        match command {
            ShellCommand::Add {
                text,
                priority,
                category,
            } => {
                let priority = priority.map(Priority::from).unwrap_or(self.default_priority);
                let category = category.unwrap_or_else(|| self.default_category.clone());
                let task = self.store.create(&text.join(" "), priority, &category)?;
                writeln!(self.out, "Task added: [{}] {}", task.id, task.text)?;
            }

            ShellCommand::List => self.print_view()?,

            ShellCommand::Check { id } => {
                let task = self.store.toggle_complete(id)?;
                let message = if task.completed {
                    "Task completed! 🎉"
                } else {
                    "Task reopened!"
                };
                writeln!(self.out, "{} [{}] {}", message, task.id, task.text)?;
            }

            ShellCommand::Edit { id, text } => {
                let task = self.store.edit(id, &text.join(" "))?;
                writeln!(self.out, "Task updated: [{}] {}", task.id, task.text)?;
            }

            ShellCommand::Remove { id } => {
                let text = self.store.list().get_or_err(id)?.text.clone();
                if confirm(&mut self.input, &mut self.out, &format!("Delete \"{}\"?", text))? {
                    self.store.remove(id)?;
                    writeln!(self.out, "Task deleted!")?;
                } else {
                    writeln!(self.out, "Cancelled.")?;
                }
            }

            ShellCommand::Select { ids } => {
                for id in ids {
                    self.store.toggle_selection(id)?;
                }
                writeln!(self.out, "{} selected", self.store.selection().len())?;
            }

            ShellCommand::SelectAll => {
                self.store.toggle_select_all();
                writeln!(self.out, "{} selected", self.store.selection().len())?;
            }

            ShellCommand::DeleteSelected => {
                let count = self.store.selection().len();
                if count == 0 {
                    writeln!(self.out, "No tasks selected!")?;
                } else if confirm(
                    &mut self.input,
                    &mut self.out,
                    &format!("Delete {} selected task(s)?", count),
                )? {
                    let removed = self.store.delete_selected();
                    writeln!(self.out, "Deleted {} task(s).", removed)?;
                } else {
                    writeln!(self.out, "Cancelled.")?;
                }
            }

            ShellCommand::Clear => {
                let count = self.store.list().count_completed();
                if count == 0 {
                    writeln!(self.out, "No completed tasks to clear!")?;
                } else if confirm(
                    &mut self.input,
                    &mut self.out,
                    &format!("Clear {} completed task(s)?", count),
                )? {
                    let removed = self.store.clear_completed();
                    writeln!(self.out, "Cleared {} completed task(s).", removed)?;
                } else {
                    writeln!(self.out, "Cancelled.")?;
                }
            }

            ShellCommand::Filter { filter } => {
                self.store.set_filter(filter.into());
                self.print_view()?;
            }

            ShellCommand::Sort { sort } => {
                self.store.set_sort(sort.into());
                self.print_view()?;
            }

            ShellCommand::Search { term } => {
                self.store.set_search(&term.join(" "));
                self.print_view()?;
            }

            ShellCommand::Escape => match self.store.escape() {
                Escaped::Search => writeln!(self.out, "Search cleared.")?,
                Escaped::Selection => writeln!(self.out, "Selection cleared.")?,
                Escaped::Nothing => {}
            },

            ShellCommand::Stats => {
                let stats = self.store.stats();
                writeln!(self.out, "{}", format_summary(&stats, self.use_color))?;
            }

            ShellCommand::Theme => {
                let theme = self.store.toggle_theme();
                writeln!(self.out, "Theme: {}", theme)?;
            }

            ShellCommand::Save => {
                if self.store.save() {
                    writeln!(self.out, "Saved.")?;
                } else {
                    writeln!(self.out, "Save failed, changes are kept in memory.")?;
                }
            }

            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn print_view(&mut self) -> Result<()> {
        let prefs = self.store.preferences();
        let mut header = format!("filter: {}, sort: {}", prefs.filter, prefs.sort);
        if let Some(term) = self.store.search() {
            header.push_str(&format!(", search: {}", term));
        }
        writeln!(self.out, "{}", header)?;

        let now = Local::now();
        let visible = self.store.visible();
        if visible.is_empty() {
            writeln!(self.out, "No tasks found.")?;
        }
        for task in visible {
            let marker = if self.store.selection().contains(task.id) {
                "*"
            } else {
                " "
            };
            writeln!(
                self.out,
                "{} {}",
                marker,
                format_task(task, DisplayMode::Default, self.use_color, now)
            )?;
        }

        let stats = self.store.stats();
        writeln!(self.out, "{}", format_summary(&stats, self.use_color))?;
        Ok(())
    }
}
