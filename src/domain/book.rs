use std::fmt;

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Year;

/// A single entry in the catalog.
///
/// A book is a plain record. It performs no validation of its own: the year
/// and status are stored as given, and callers are expected to build new
/// books through [`NewBook`], which validates user input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Book {
    /// Globally unique, perpetually stable identifier.
    pub id: String,
    /// Title of the book.
    pub title: String,
    /// Author of the book.
    pub author: String,
    /// Year of publication.
    pub year: String,
    /// Lending status, usually one of the [`Status`] values.
    pub status: String,
}

/// The fields of a [`Book`], in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The unique identifier.
    Id,
    /// The title.
    Title,
    /// The author.
    Author,
    /// The year of publication.
    Year,
    /// The lending status.
    Status,
}

impl Field {
    /// Every field, in rendering order.
    pub const ALL: [Self; 5] = [
        Self::Id,
        Self::Title,
        Self::Author,
        Self::Year,
        Self::Status,
    ];

    /// The label used when rendering a book.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Year => "Year",
            Self::Status => "Status",
        }
    }
}

impl Book {
    /// Construct a book from all of its fields.
    #[must_use]
    pub const fn new(
        id: String,
        title: String,
        author: String,
        year: String,
        status: String,
    ) -> Self {
        Self {
            id,
            title,
            author,
            year,
            status,
        }
    }

    /// The value of a single field.
    #[must_use]
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Year => &self.year,
            Field::Status => &self.status,
        }
    }

    /// Iterate over every field and its value.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.into_iter().map(|field| (field, self.field(field)))
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, value)) in self.fields().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {value}", field.label())?;
        }
        Ok(())
    }
}

/// The lending status of a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    /// On the shelf.
    #[default]
    Available,
    /// Lent out.
    CheckedOut,
}

impl Status {
    /// Map a status code, as chosen from the menu, to a status.
    ///
    /// `"1"` means available. Every other code means checked out.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        if code == "1" {
            Self::Available
        } else {
            Self::CheckedOut
        }
    }

    /// The text stored in a book's status field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::CheckedOut => "checked out",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated book which has not yet been assigned an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    /// Title of the book.
    pub title: NonEmptyString,
    /// Author of the book.
    pub author: NonEmptyString,
    /// Year of publication.
    pub year: Year,
    /// Initial lending status.
    pub status: Status,
}

impl NewBook {
    /// Create a draft for an available book.
    #[must_use]
    pub fn new(title: NonEmptyString, author: NonEmptyString, year: Year) -> Self {
        Self {
            title,
            author,
            year,
            status: Status::Available,
        }
    }

    /// Turn the draft into a [`Book`].
    ///
    /// A new random identifier is generated.
    #[must_use]
    pub fn into_book(self) -> Book {
        Book::new(
            Uuid::new_v4().to_string(),
            self.title.as_str().to_string(),
            self.author.as_str().to_string(),
            self.year.to_string(),
            self.status.as_str().to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn dune() -> Book {
        Book::new(
            "b7c2".to_string(),
            "Dune".to_string(),
            "Frank Herbert".to_string(),
            "1965".to_string(),
            "available".to_string(),
        )
    }

    #[test]
    fn renders_all_fields_with_labels() {
        let expected = "ID: b7c2\nTitle: Dune\nAuthor: Frank Herbert\nYear: 1965\nStatus: available";
        assert_eq!(dune().to_string(), expected);
    }

    #[test]
    fn fields_are_enumerated_in_order() {
        let book = dune();
        let values: Vec<_> = book.fields().map(|(_, value)| value).collect();
        assert_eq!(
            values,
            ["b7c2", "Dune", "Frank Herbert", "1965", "available"]
        );
    }

    #[test_case("1", Status::Available)]
    #[test_case("2", Status::CheckedOut)]
    #[test_case("", Status::CheckedOut; "empty code")]
    #[test_case("available", Status::CheckedOut; "status text is not a code")]
    fn status_codes(code: &str, expected: Status) {
        assert_eq!(Status::from_code(code), expected);
    }

    #[test]
    fn new_books_get_fresh_identifiers() {
        let draft = NewBook::new(
            NonEmptyString::new("Foo".to_string()).unwrap(),
            NonEmptyString::new("Bar".to_string()).unwrap(),
            "2001".parse().unwrap(),
        );

        let first = draft.clone().into_book();
        let second = draft.into_book();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert_eq!(first.title, "Foo");
        assert_eq!(first.author, "Bar");
        assert_eq!(first.year, "2001");
        assert_eq!(first.status, "available");
    }
}
