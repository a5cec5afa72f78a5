/// JSON encoding of the catalog.
pub mod json;
mod library;

pub use library::{AddError, Library, SaveError, UpdateError};
