//! Personal Library Catalog
//!
//! Books are stored as a JSON array in a single file, which is rewritten in
//! full after every change.

pub mod domain;
pub use domain::{Book, Config, Field, NewBook, Status, Year, YearError};

/// File-backed storage of the catalog.
pub mod storage;
pub use storage::{AddError, Library, SaveError, UpdateError};
