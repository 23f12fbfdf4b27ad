//! Author model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::BookShort;

/// Full author model from database. `book_count` is filled by a COUNT
/// subquery over the book relation in every author query.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub biography: Option<String>,
    pub book_count: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Short author representation for embedding in book views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuthorShort {
    pub id: i32,
    pub name: String,
}

/// Author with its related books, for the detail endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDetails {
    pub id: i32,
    pub name: String,
    pub biography: Option<String>,
    pub book_count: i64,
    pub books: Vec<BookShort>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl AuthorDetails {
    pub fn from_author(author: Author, books: Vec<BookShort>) -> Self {
        Self {
            id: author.id,
            name: author.name,
            biography: author.biography,
            book_count: author.book_count,
            books,
            created_at: author.created_at,
            updated_at: author.updated_at,
        }
    }
}

/// Create author request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, message = "Author name is required"))]
    pub name: String,
    pub biography: Option<String>,
}

/// Update author request. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, message = "Author name is required"))]
    pub name: Option<String>,
    pub biography: Option<String>,
}
