//! Domain models for the catalog.
//!
//! This module contains the book record, the validated input types used to
//! create new books, and configuration.

/// Book records and the types used to create them.
pub mod book;
pub use book::{Book, Field, NewBook, Status};

mod config;
pub use config::Config;

/// Publication years.
pub mod year;
pub use year::{Year, YearError};
