//! Book (catalog entry) model and availability rules.
//!
//! Copy accounting is never stored: `sold_copies` is counted from `sold`
//! orders on every read and `is_available` is derived from it, so the
//! derived fields cannot drift from the order rows.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::author::AuthorShort;

/// Availability of a book given its copy counts.
///
/// Both branches yield `false` when total and sold are both zero; the
/// two-branch shape is the authoritative form of the rule.
pub fn availability(total_copies: i32, sold_copies: i32) -> bool {
    if sold_copies > 0 || total_copies > 0 {
        total_copies > sold_copies
    } else {
        false
    }
}

/// Pre-commit check for the website flag: a book may only be shown on the
/// website while it is available.
pub fn website_visibility_ok(show_on_website: bool, is_available: bool) -> bool {
    !show_on_website || is_available
}

/// Full book model from database. `sold_copies` is filled by a COUNT
/// subquery in every book query.
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub isbn: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub cover_image: Option<Vec<u8>>,
    pub summary: Option<String>,
    pub total_copies: i32,
    pub show_on_website: bool,
    pub sold_copies: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Book {
    pub fn is_available(&self) -> bool {
        availability(self.total_copies, self.sold_copies)
    }
}

/// Short book representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub name: String,
    pub isbn: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub total_copies: i32,
    pub sold_copies: i32,
    #[sqlx(skip)]
    pub is_available: bool,
}

/// Full book representation for the API and the website detail page.
/// The cover image travels as base64.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub name: String,
    pub isbn: Option<String>,
    pub published_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub summary: Option<String>,
    pub total_copies: i32,
    pub sold_copies: i32,
    pub order_count: i32,
    pub is_available: bool,
    pub show_on_website: bool,
    pub authors: Vec<AuthorShort>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl BookDetails {
    pub fn from_book(book: Book, authors: Vec<AuthorShort>) -> Self {
        use base64::{engine::general_purpose::STANDARD, Engine as _};

        let is_available = book.is_available();
        Self {
            id: book.id,
            name: book.name,
            isbn: book.isbn,
            published_date: book.published_date,
            cover_image: book.cover_image.map(|bytes| STANDARD.encode(bytes)),
            summary: book.summary,
            total_copies: book.total_copies,
            // order_count counts sold orders, same filter as sold_copies
            sold_copies: book.sold_copies,
            order_count: book.sold_copies,
            is_available,
            show_on_website: book.show_on_website,
            authors,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

/// Persistence shape for book writes, built by the service from a
/// create/update request (cover already decoded).
#[derive(Debug, Clone)]
pub struct BookData {
    pub name: String,
    pub isbn: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub cover_image: Option<Vec<u8>>,
    pub summary: Option<String>,
    pub total_copies: i32,
    pub show_on_website: bool,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Book name is required"))]
    pub name: String,
    pub isbn: Option<String>,
    /// IDs of the authors linked to this book
    #[serde(default)]
    pub author_ids: Vec<i32>,
    pub published_date: Option<NaiveDate>,
    /// Base64-encoded cover image
    pub cover_image: Option<String>,
    pub summary: Option<String>,
    #[serde(default = "default_total_copies")]
    pub total_copies: i32,
    #[serde(default)]
    pub show_on_website: bool,
}

fn default_total_copies() -> i32 {
    1
}

/// Update book request. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Book name is required"))]
    pub name: Option<String>,
    pub isbn: Option<String>,
    pub author_ids: Option<Vec<i32>>,
    pub published_date: Option<NaiveDate>,
    /// Base64-encoded cover image
    pub cover_image: Option<String>,
    pub summary: Option<String>,
    pub total_copies: Option<i32>,
    pub show_on_website: Option<bool>,
}

/// Book query parameters (API)
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    pub name: Option<String>,
    pub isbn: Option<String>,
    pub show_on_website: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
