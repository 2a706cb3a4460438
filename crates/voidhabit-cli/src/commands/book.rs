use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use serde_json::json;

use voidhabit_core::books::{completed_count, initials, Book, BookStatus, COLOR_GRADIENTS};
use voidhabit_core::storage::Database;

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum BookAction {
    /// Add a book to the shelf
    Add {
        title: String,
        author: String,
        /// wishlist (default), reading or completed
        #[arg(long, value_parser = parse_status)]
        status: Option<BookStatus>,
    },
    /// List the shelf
    List {
        #[arg(long)]
        json: bool,
    },
    /// Move a book to a new status
    SetStatus {
        id: String,
        #[arg(value_parser = parse_status)]
        status: BookStatus,
        /// Finish date to record with a completed status
        #[arg(long)]
        finish_date: Option<NaiveDate>,
    },
    /// Remove a book from the shelf
    Delete { id: String },
}

fn parse_status(raw: &str) -> Result<BookStatus, String> {
    match raw {
        "wishlist" => Ok(BookStatus::Wishlist),
        "reading" => Ok(BookStatus::Reading),
        "completed" => Ok(BookStatus::Completed),
        other => Err(format!(
            "unknown status '{other}' (expected wishlist, reading or completed)"
        )),
    }
}

pub fn run(action: BookAction) -> CliResult {
    let db = Database::open()?;

    match action {
        BookAction::Add {
            title,
            author,
            status,
        } => {
            if title.trim().is_empty() {
                return Err("book title must not be empty".into());
            }
            let mut book = Book::new(title, author);
            // Gradients cycle with the shelf size, as the original covers
            // did.
            let shelf = db.list_books()?;
            book.color_gradient = COLOR_GRADIENTS[shelf.len() % COLOR_GRADIENTS.len()].into();
            if let Some(status) = status {
                book.status = status;
                if status == BookStatus::Reading {
                    book.start_date = Some(Utc::now().date_naive());
                }
            }
            db.insert_book(&book)?;
            print_json(&book)?;
        }
        BookAction::List { json } => {
            let books = db.list_books()?;
            if json {
                return print_json(&books);
            }
            println!("Estante ({} concluídos)", completed_count(&books));
            for b in &books {
                println!(
                    "  [{}] {} - {} ({}) {}",
                    initials(&b.title),
                    b.title,
                    b.author,
                    b.status.label(),
                    b.id,
                );
            }
        }
        BookAction::SetStatus {
            id,
            status,
            finish_date,
        } => {
            let finish = match status {
                BookStatus::Completed => {
                    Some(finish_date.unwrap_or_else(|| Utc::now().date_naive()))
                }
                _ => None,
            };
            db.set_book_status(&id, status, finish)?;
            print_json(&json!({ "id": id, "status": status, "finish_date": finish }))?;
        }
        BookAction::Delete { id } => {
            db.delete_book(&id)?;
            println!("deleted {id}");
        }
    }
    Ok(())
}
