//! JSON encoding of the catalog.
//!
//! The catalog is stored as an array of objects with exactly the keys `id`,
//! `title`, `author`, `year` and `status`, pretty-printed with two-space
//! indentation. Non-ASCII text is written as-is.

use crate::Book;

/// Encode a collection of books as JSON text.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(books: &[Book]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(books)
}

/// Decode a collection of books from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not valid JSON, or if any entry is not an
/// object with exactly the five string fields of a book.
pub fn decode(text: &str) -> Result<Vec<Book>, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, title: &str, author: &str) -> Book {
        Book::new(
            id.to_string(),
            title.to_string(),
            author.to_string(),
            "1949".to_string(),
            "available".to_string(),
        )
    }

    #[test]
    fn encodes_pretty_printed_in_field_order() {
        let encoded = encode(&[book("1", "1984", "George Orwell")]).unwrap();

        let expected = r#"[
  {
    "id": "1",
    "title": "1984",
    "author": "George Orwell",
    "year": "1949",
    "status": "available"
  }
]"#;
        assert_eq!(encoded, expected);
    }

    #[test]
    fn non_ascii_is_written_literally() {
        let encoded = encode(&[book("1", "Мастер и Маргарита", "Булгаков")]).unwrap();

        assert!(encoded.contains("Мастер и Маргарита"));
        assert!(!encoded.contains("\\u"));
    }

    #[test]
    fn empty_collection() {
        assert_eq!(encode(&[]).unwrap(), "[]");
        assert!(decode("[]").unwrap().is_empty());
    }

    #[test]
    fn decodes_regardless_of_key_order() {
        let text = r#"[{"status": "checked out", "year": "1965", "author": "Frank Herbert", "title": "Dune", "id": "x"}]"#;

        let books = decode(text).unwrap();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[0].status, "checked out");
    }

    #[test]
    fn decode_preserves_order() {
        let books = vec![book("a", "A", "X"), book("b", "B", "Y"), book("c", "C", "Z")];

        let decoded = decode(&encode(&books).unwrap()).unwrap();

        assert_eq!(decoded, books);
    }

    #[test]
    fn rejects_malformed_content() {
        assert!(decode("not json").is_err());
        assert!(decode(r#"{"id": "1"}"#).is_err());
        assert!(decode(r#"[{"id": "1", "title": "T"}]"#).is_err());
        assert!(
            decode(r#"[{"id": "1", "title": "T", "author": "A", "year": 1999, "status": "s"}]"#)
                .is_err()
        );
        assert!(
            decode(
                r#"[{"id": "1", "title": "T", "author": "A", "year": "1999", "status": "s", "isbn": "x"}]"#
            )
            .is_err()
        );
    }
}
