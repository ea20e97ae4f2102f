//! Todo CLI commands

use clap::Subcommand;

use crate::display::format_todo_table;
use crate::error::KakeiboResult;
use crate::models::parse_date;
use crate::services::Household;

use super::transaction::date_or_today;

/// Todo subcommands
#[derive(Subcommand)]
pub enum TodoCommands {
    /// Add a todo
    Add {
        /// What needs doing
        content: String,
        /// Due date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List all todos by due date
    List,
    /// Show open todos due on one day
    Day {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Mark a todo as done
    Done {
        /// Todo ID (a leading part is enough)
        id: String,
    },
    /// Mark a todo as not done
    Undone {
        /// Todo ID (a leading part is enough)
        id: String,
    },
    /// Delete a todo
    Delete {
        /// Todo ID (a leading part is enough)
        id: String,
    },
}

/// Handle a todo command
pub fn handle_todo_command(household: &mut Household, cmd: TodoCommands) -> KakeiboResult<()> {
    match cmd {
        TodoCommands::Add { content, date } => {
            let due = date_or_today(date.as_deref())?;
            let todo = household.add_todo(&content, due)?;
            println!("Added {}: {}", todo.id(), todo);
        }

        TodoCommands::List => {
            let todos = household.todos().all_sorted();
            print!("{}", format_todo_table(&todos));
        }

        TodoCommands::Day { date } => {
            let date = parse_date(&date)?;
            let todos = household.todos().uncompleted_for_day(date);
            print!("{}", format_todo_table(&todos));
        }

        TodoCommands::Done { id } => set_completed(household, &id, true)?,

        TodoCommands::Undone { id } => set_completed(household, &id, false)?,

        TodoCommands::Delete { id } => {
            let todo = household.todos().find_by_prefix(&id)?.clone();
            household.delete_todo(todo.id())?;
            println!("Deleted {}: {}", todo.id(), todo.content());
        }
    }

    Ok(())
}

fn set_completed(household: &mut Household, fragment: &str, completed: bool) -> KakeiboResult<()> {
    let id = household.todos().find_by_prefix(fragment)?.id().clone();

    let state = if completed { "done" } else { "open" };
    if household.set_todo_completed(&id, completed)? {
        println!("Marked {} as {}", id, state);
    } else {
        println!("{} is already {}", id, state);
    }
    Ok(())
}
