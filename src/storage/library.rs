//! A file-backed store of books
//!
//! The [`Library`] holds the whole catalog in memory, in insertion order, and
//! rewrites the backing file after every change. The file is read once, when
//! the library is opened.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{Book, Status, storage::json};

/// A file-backed store of books.
#[derive(Debug)]
pub struct Library {
    /// The JSON file the catalog is persisted to.
    path: PathBuf,
    books: Vec<Book>,
}

impl Library {
    /// Open the library stored at `path`.
    ///
    /// A missing file is treated as an empty library. A file whose content
    /// cannot be decoded is reported with a warning and also treated as
    /// empty; its content will be overwritten by the next save.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let books = load(&path)?;

        tracing::debug!("Loaded {} book(s) from {}", books.len(), path.display());

        Ok(Self { path, books })
    }

    /// The path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The number of books in the library.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the library holds no books.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Every book in the library, in the order they were added.
    #[must_use]
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    /// Find a book by its identifier.
    ///
    /// If several books share the identifier, the first is returned.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    /// Add a book to the library and save.
    ///
    /// The library is left unchanged if saving fails.
    ///
    /// # Errors
    ///
    /// This method can fail if:
    ///
    /// - a book with the same identifier is already in the library
    /// - the library cannot be saved
    pub fn add(&mut self, book: Book) -> Result<&Book, AddError> {
        if self.get(&book.id).is_some() {
            return Err(AddError::DuplicateId(book.id));
        }

        self.books.push(book);
        if let Err(e) = self.save() {
            self.books.pop();
            return Err(e.into());
        }

        let book = &self.books[self.books.len() - 1];
        tracing::info!("Added book: {}", book.id);

        Ok(book)
    }

    /// Remove the book with the given identifier and save.
    ///
    /// Only the first matching book is removed. The library is not saved if
    /// no book matches, and is left unchanged if saving fails.
    ///
    /// # Errors
    ///
    /// This method can fail if:
    ///
    /// - no book has the given identifier
    /// - the library cannot be saved
    pub fn delete(&mut self, id: &str) -> Result<Book, UpdateError> {
        let index = self
            .position(id)
            .ok_or_else(|| UpdateError::NotFound(id.to_string()))?;

        let book = self.books.remove(index);
        if let Err(e) = self.save() {
            self.books.insert(index, book);
            return Err(e.into());
        }

        tracing::info!("Deleted book: {id}");

        Ok(book)
    }

    /// Change the status of the book with the given identifier and save.
    ///
    /// `code` is a status code as understood by [`Status::from_code`].
    /// Only the first matching book is changed, and it is left unchanged if
    /// saving fails.
    ///
    /// # Errors
    ///
    /// This method can fail if:
    ///
    /// - no book has the given identifier
    /// - the library cannot be saved
    pub fn change_status(&mut self, id: &str, code: &str) -> Result<&Book, UpdateError> {
        let index = self
            .position(id)
            .ok_or_else(|| UpdateError::NotFound(id.to_string()))?;

        let status = Status::from_code(code);
        let previous = std::mem::replace(
            &mut self.books[index].status,
            status.as_str().to_string(),
        );
        if let Err(e) = self.save() {
            self.books[index].status = previous;
            return Err(e.into());
        }

        tracing::info!("Changed status of {id} to '{status}'");

        Ok(&self.books[index])
    }

    /// Find every book matching at least one of the criteria.
    ///
    /// A book matches a criterion if any of its fields contains the criterion,
    /// ignoring case. Results are in first-seen order: criteria in the order
    /// given, and books in library order within each criterion. Each book is
    /// reported at most once.
    #[must_use]
    pub fn search<S: AsRef<str>>(&self, criteria: &[S]) -> Vec<&Book> {
        let mut seen = vec![false; self.books.len()];
        let mut results = Vec::new();

        for criterion in criteria {
            let needle = criterion.as_ref().to_lowercase();

            for (index, book) in self.books.iter().enumerate() {
                if !seen[index] && matches(book, &needle) {
                    seen[index] = true;
                    results.push(book);
                }
            }
        }

        results
    }

    /// Write the whole library to the backing file.
    ///
    /// Parent directories are created if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the library cannot be encoded or the file cannot be
    /// written.
    pub fn save(&self) -> Result<(), SaveError> {
        let encoded = json::encode(&self.books)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(encoded.as_bytes())?;
        writer.flush()?;

        tracing::debug!(
            "Saved {} book(s) to {}",
            self.books.len(),
            self.path.display()
        );

        Ok(())
    }
}

/// `needle` must already be lowercase.
fn matches(book: &Book, needle: &str) -> bool {
    book.fields()
        .any(|(_, value)| value.to_lowercase().contains(needle))
}

fn load(path: &Path) -> io::Result<Vec<Book>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No library at {}, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            tracing::warn!(
                "Library file {} is not valid UTF-8, starting empty: {e}",
                path.display()
            );
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    Ok(json::decode(&text).unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to read library file {}, check its content. Starting empty: {e}",
            path.display()
        );
        Vec::new()
    }))
}

/// An error saving the library.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The backing file could not be written.
    #[error("failed to write library file: {0}")]
    Io(#[from] io::Error),

    /// The library could not be encoded.
    #[error("failed to encode library: {0}")]
    Encode(#[from] serde_json::Error),
}

/// An error adding a book.
#[derive(Debug, thiserror::Error)]
pub enum AddError {
    /// A book with the same identifier already exists.
    #[error("a book with ID {0} already exists")]
    DuplicateId(String),

    /// The library could not be saved.
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// An error deleting a book or changing its status.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// No book has the given identifier.
    #[error("no book with ID {0} was found")]
    NotFound(String),

    /// The library could not be saved.
    #[error(transparent)]
    Save(#[from] SaveError),
}
