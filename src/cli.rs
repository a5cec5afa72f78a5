use std::path::{Path, PathBuf};

mod menu;
mod terminal;

use catalog::{Book, Config, Library, NewBook, UpdateError, Year};
use clap::ArgAction;
use non_empty_string::NonEmptyString;
use terminal::Colorize;
use tracing::instrument;

/// Parse a required text field, trimming surrounding whitespace.
fn parse_non_empty(s: &str) -> Result<NonEmptyString, String> {
    NonEmptyString::new(s.trim().to_string()).map_err(|_| "this field cannot be empty".to_string())
}

/// Split comma-separated search input into criteria.
///
/// Blank criteria are dropped.
fn split_criteria(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|criterion| !criterion.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn print_books<'a>(books: impl IntoIterator<Item = &'a Book>) {
    for book in books {
        println!("{book}\n");
    }
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file
    ///
    /// Defaults to 'catalog.toml' in the working directory, if present.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the book database, overriding the configuration
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let path = self.database_path()?;
        let mut library = Library::open(&path)
            .map_err(|e| anyhow::anyhow!("Failed to open {}: {e}", path.display()))?;

        self.command
            .unwrap_or(Command::Menu)
            .run(&mut library)
    }

    fn database_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(file) = &self.file {
            return Ok(file.clone());
        }

        let config = match &self.config {
            Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!("{e}"))?,
            None => Config::discover(Path::new(".")),
        };

        Ok(config.database)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Interactive menu (default)
    Menu,

    /// Add a new book
    Add(Add),

    /// Delete a book
    Delete(Delete),

    /// Search for books
    ///
    /// A book is shown if any of its fields contains any of the criteria,
    /// ignoring case.
    Search(Search),

    /// List all books
    List,

    /// Change the status of a book
    Status(ChangeStatus),
}

impl Command {
    fn run(self, library: &mut Library) -> anyhow::Result<()> {
        match self {
            Self::Menu => menu::run(library)?,
            Self::Add(command) => command.run(library)?,
            Self::Delete(command) => command.run(library)?,
            Self::Search(command) => command.run(library),
            Self::List => list(library),
            Self::Status(command) => command.run(library)?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Add {
    /// The title of the book
    #[arg(long, short, value_parser = parse_non_empty)]
    title: NonEmptyString,

    /// The author of the book
    #[arg(long, short, value_parser = parse_non_empty)]
    author: NonEmptyString,

    /// The year of publication (four digits)
    #[arg(long, short)]
    year: Year,
}

impl Add {
    #[instrument(skip(library))]
    fn run(self, library: &mut Library) -> anyhow::Result<()> {
        let book = NewBook::new(self.title, self.author, self.year).into_book();
        let book = library.add(book)?;

        println!("{}", format!("✅ Added '{}'", book.title).success());
        println!("{}", format!("   ID: {}", book.id).dim());

        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Delete {
    /// The ID of the book to delete
    id: String,
}

impl Delete {
    #[instrument(skip(library))]
    fn run(self, library: &mut Library) -> anyhow::Result<()> {
        match library.delete(&self.id) {
            Ok(book) => println!("{}", format!("✅ Deleted '{}'", book.title).success()),
            Err(UpdateError::NotFound(id)) => {
                println!("{}", terminal::not_found(&id));
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Search {
    /// Terms to search for
    #[arg(required = true, num_args = 1..)]
    criteria: Vec<String>,
}

impl Search {
    #[instrument(skip(library))]
    fn run(self, library: &Library) {
        let results = library.search(&self.criteria);

        if results.is_empty() {
            println!("{}", "No books found".dim());
        } else {
            println!("Found {} book(s):\n", results.len());
            print_books(results);
        }
    }
}

fn list(library: &Library) {
    if library.is_empty() {
        println!("{}", "The library is empty".dim());
    } else {
        print_books(library.list());
    }
}

#[derive(Debug, clap::Parser)]
pub struct ChangeStatus {
    /// The ID of the book
    id: String,

    /// The new status: 1 (available) or 2 (checked out)
    #[arg(value_parser = ["1", "2"])]
    code: String,
}

impl ChangeStatus {
    #[instrument(skip(library))]
    fn run(self, library: &mut Library) -> anyhow::Result<()> {
        match library.change_status(&self.id, &self.code) {
            Ok(book) => println!(
                "{}",
                format!("✅ '{}' is now {}", book.title, book.status).success()
            ),
            Err(UpdateError::NotFound(id)) => {
                println!("{}", terminal::not_found(&id));
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}
