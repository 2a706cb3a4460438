//! Reading-list bookshelf.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cover gradient palette cycled through when adding books.
pub const COLOR_GRADIENTS: [&str; 8] = [
    "from-purple-500 to-indigo-500",
    "from-emerald-500 to-teal-500",
    "from-blue-500 to-cyan-500",
    "from-orange-500 to-amber-500",
    "from-pink-500 to-rose-500",
    "from-red-500 to-orange-500",
    "from-yellow-500 to-lime-500",
    "from-green-500 to-emerald-500",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Wishlist,
    Reading,
    Completed,
}

impl BookStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BookStatus::Wishlist => "Wishlist",
            BookStatus::Reading => "Lendo",
            BookStatus::Completed => "Concluído",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookStatus::Wishlist => "wishlist",
            BookStatus::Reading => "reading",
            BookStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub status: BookStatus,
    pub start_date: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
    pub color_gradient: String,
    pub created_at: DateTime<Utc>,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("book-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            title: title.into(),
            author: author.into(),
            status: BookStatus::Wishlist,
            start_date: None,
            finish_date: None,
            color_gradient: COLOR_GRADIENTS[0].into(),
            created_at: now,
        }
    }
}

/// Up to two uppercase initials for the cover placeholder.
pub fn initials(title: &str) -> String {
    title
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

/// Number of finished books on the shelf.
pub fn completed_count(books: &[Book]) -> usize {
    books
        .iter()
        .filter(|b| b.status == BookStatus::Completed)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_book_defaults() {
        let b = Book::new("O Alquimista", "Paulo Coelho");
        assert_eq!(b.status, BookStatus::Wishlist);
        assert_eq!(b.color_gradient, COLOR_GRADIENTS[0]);
        assert!(b.id.starts_with("book-"));
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("O Alquimista"), "OA");
        assert_eq!(initials("Dom Casmurro e outros"), "DC");
        assert_eq!(initials("duna"), "D");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn counts_completed_books() {
        let mut a = Book::new("A", "x");
        a.status = BookStatus::Completed;
        let b = Book::new("B", "y");
        let mut c = Book::new("C", "z");
        c.status = BookStatus::Reading;
        assert_eq!(completed_count(&[a, b, c]), 1);
    }

    #[test]
    fn status_labels() {
        assert_eq!(BookStatus::Reading.label(), "Lendo");
        assert_eq!(BookStatus::Completed.label(), "Concluído");
    }
}
