//! Authors repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{availability, BookShort},
    },
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get author by ID with its live book count
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            SELECT a.id, a.name, a.biography,
                   COALESCE((
                       SELECT COUNT(*) FROM book_authors ba WHERE ba.author_id = a.id
                   ), 0) AS book_count,
                   a.created_at, a.updated_at
            FROM authors a
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// List all authors with their live book counts
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT a.id, a.name, a.biography,
                   COALESCE((
                       SELECT COUNT(*) FROM book_authors ba WHERE ba.author_id = a.id
                   ), 0) AS book_count,
                   a.created_at, a.updated_at
            FROM authors a
            ORDER BY a.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Load all books for an author via the book_authors junction table
    pub async fn books_for_author(&self, author_id: i32) -> AppResult<Vec<BookShort>> {
        let mut books = sqlx::query_as::<_, BookShort>(
            r#"
            SELECT b.id, b.name, b.isbn, b.published_date, b.total_copies,
                   COALESCE((
                       SELECT CAST(COUNT(*) AS INT)
                       FROM orders o
                       WHERE o.book_id = b.id AND o.status = 'sold'
                   ), 0) AS sold_copies
            FROM book_authors ba
            JOIN books b ON b.id = ba.book_id
            WHERE ba.author_id = $1
            ORDER BY b.name
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        for book in &mut books {
            book.is_available = availability(book.total_copies, book.sold_copies);
        }

        Ok(books)
    }

    /// Create a new author
    pub async fn create(&self, name: &str, biography: Option<&str>) -> AppResult<Author> {
        let now = Utc::now();

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO authors (name, biography, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(biography)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update an existing author
    pub async fn update(&self, id: i32, name: &str, biography: Option<&str>) -> AppResult<Author> {
        let result = sqlx::query(
            "UPDATE authors SET name = $1, biography = $2, updated_at = $3 WHERE id = $4",
        )
        .bind(name)
        .bind(biography)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Delete an author. Join rows go with it; the books survive.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author with id {} not found", id)));
        }

        Ok(())
    }
}
