//! The interactive menu

use std::fmt;

use catalog::{Library, Status, Year};
use dialoguer::{Input, Select};
use tracing::instrument;

use crate::cli::{
    Add, ChangeStatus, Delete, Search, list, parse_non_empty, split_criteria, terminal::Colorize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Add,
    Delete,
    Search,
    List,
    ChangeStatus,
    Quit,
}

impl Action {
    const ALL: [Self; 6] = [
        Self::Add,
        Self::Delete,
        Self::Search,
        Self::List,
        Self::ChangeStatus,
        Self::Quit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Add => "Add a book",
            Self::Delete => "Delete a book",
            Self::Search => "Search for books",
            Self::List => "List all books",
            Self::ChangeStatus => "Change the status of a book",
            Self::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Typing this at any prompt while adding a book cancels the add.
const CANCEL: &str = "exit";

#[instrument(skip(library))]
pub fn run(library: &mut Library) -> anyhow::Result<()> {
    loop {
        let choice = Select::new()
            .with_prompt("Choose an action")
            .items(&Action::ALL)
            .default(0)
            .interact()?;

        match Action::ALL[choice] {
            Action::Add => add(library)?,
            Action::Delete => {
                let id = prompt_text("ID of the book to delete")?;
                Delete { id }.run(library)?;
            }
            Action::Search => search(library)?,
            Action::List => list(library),
            Action::ChangeStatus => change_status(library)?,
            Action::Quit => return Ok(()),
        }

        println!();
    }
}

fn add(library: &mut Library) -> anyhow::Result<()> {
    println!(
        "{}",
        format!("Enter the book details (or '{CANCEL}' to cancel)").dim()
    );

    let Some(title) = prompt_field("Title", parse_non_empty)? else {
        return Ok(());
    };
    let Some(author) = prompt_field("Author", parse_non_empty)? else {
        return Ok(());
    };
    let Some(year) = prompt_field("Year", |s| s.parse::<Year>().map_err(|e| e.to_string()))? else {
        return Ok(());
    };

    Add {
        title,
        author,
        year,
    }
    .run(library)
}

fn search(library: &Library) -> anyhow::Result<()> {
    let input = prompt_text("Search terms, separated by commas (title, author, year, ...)")?;
    let criteria = split_criteria(&input);

    if criteria.is_empty() {
        println!("{}", "Please enter at least one search term".warning());
        return Ok(());
    }

    Search { criteria }.run(library);
    Ok(())
}

fn change_status(library: &mut Library) -> anyhow::Result<()> {
    let id = prompt_text("ID of the book")?;

    let statuses = [Status::Available, Status::CheckedOut];
    let choice = Select::new()
        .with_prompt("New status")
        .items(&statuses)
        .default(0)
        .interact()?;

    // menu codes are 1-based
    let code = (choice + 1).to_string();
    ChangeStatus { id, code }.run(library)
}

fn prompt_text(prompt: &str) -> anyhow::Result<String> {
    let input = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(input.trim().to_string())
}

/// Prompt until `parse` accepts the input.
///
/// Returns `None` if the user cancels.
fn prompt_field<T>(
    prompt: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> anyhow::Result<Option<T>> {
    loop {
        let input = prompt_text(prompt)?;
        if is_cancel(&input) {
            println!("{}", "Cancelled".dim());
            return Ok(None);
        }

        match parse(&input) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => println!("{}", format!("{prompt}: {e}").warning()),
        }
    }
}

fn is_cancel(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(CANCEL)
}
