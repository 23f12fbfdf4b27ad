//! Books repository for database operations.
//!
//! Every book query recomputes `sold_copies` from the order rows with a
//! COUNT subquery, so the derived availability never drifts from a stored
//! counter.

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::AuthorShort,
        book::{availability, Book, BookData, BookQuery, BookShort},
        order::Order,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// Get book by ID with its live sold-copy count
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            SELECT b.id, b.name, b.isbn, b.published_date, b.cover_image,
                   b.summary, b.total_copies, b.show_on_website,
                   COALESCE((
                       SELECT CAST(COUNT(*) AS INT)
                       FROM orders o
                       WHERE o.book_id = b.id AND o.status = 'sold'
                   ), 0) AS sold_copies,
                   b.created_at, b.updated_at
            FROM books b
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Search books with pagination
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<BookShort>, i64)> {
        let page = query.page.unwrap_or(1);
        let per_page = query.per_page.unwrap_or(20);
        let offset = (page - 1) * per_page;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM books b
            WHERE ($1::text IS NULL OR LOWER(b.name) LIKE '%' || LOWER($1) || '%')
              AND ($2::text IS NULL OR b.isbn = $2)
              AND ($3::boolean IS NULL OR b.show_on_website = $3)
            "#,
        )
        .bind(&query.name)
        .bind(&query.isbn)
        .bind(query.show_on_website)
        .fetch_one(&self.pool)
        .await?;

        let mut books = sqlx::query_as::<_, BookShort>(
            r#"
            SELECT b.id, b.name, b.isbn, b.published_date, b.total_copies,
                   COALESCE((
                       SELECT CAST(COUNT(*) AS INT)
                       FROM orders o
                       WHERE o.book_id = b.id AND o.status = 'sold'
                   ), 0) AS sold_copies
            FROM books b
            WHERE ($1::text IS NULL OR LOWER(b.name) LIKE '%' || LOWER($1) || '%')
              AND ($2::text IS NULL OR b.isbn = $2)
              AND ($3::boolean IS NULL OR b.show_on_website = $3)
            ORDER BY b.name
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(&query.name)
        .bind(&query.isbn)
        .bind(query.show_on_website)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        for book in &mut books {
            book.is_available = availability(book.total_copies, book.sold_copies);
        }

        Ok((books, total))
    }

    /// List all books with their live sold-copy counts
    pub async fn list_all(&self) -> AppResult<Vec<BookShort>> {
        let mut books = sqlx::query_as::<_, BookShort>(
            r#"
            SELECT b.id, b.name, b.isbn, b.published_date, b.total_copies,
                   COALESCE((
                       SELECT CAST(COUNT(*) AS INT)
                       FROM orders o
                       WHERE o.book_id = b.id AND o.status = 'sold'
                   ), 0) AS sold_copies
            FROM books b
            ORDER BY b.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        for book in &mut books {
            book.is_available = availability(book.total_copies, book.sold_copies);
        }

        Ok(books)
    }

    /// Load all authors for a book via the book_authors junction table
    pub async fn authors_for_book(&self, book_id: i32) -> AppResult<Vec<AuthorShort>> {
        let authors = sqlx::query_as::<_, AuthorShort>(
            r#"
            SELECT a.id, a.name
            FROM book_authors ba
            JOIN authors a ON a.id = ba.author_id
            WHERE ba.book_id = $1
            ORDER BY a.name
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Load all orders for a book
    pub async fn orders_for_book(&self, book_id: i32) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, book_id, customer, status, created_at
            FROM orders
            WHERE book_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Create a new book
    pub async fn create(&self, data: &BookData) -> AppResult<Book> {
        let now = Utc::now();

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (
                name, isbn, published_date, cover_image, summary,
                total_copies, show_on_website, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.isbn)
        .bind(data.published_date)
        .bind(&data.cover_image)
        .bind(&data.summary)
        .bind(data.total_copies)
        .bind(data.show_on_website)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update an existing book
    pub async fn update(&self, id: i32, data: &BookData) -> AppResult<Book> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET name = $1, isbn = $2, published_date = $3, cover_image = $4,
                summary = $5, total_copies = $6, show_on_website = $7,
                updated_at = $8
            WHERE id = $9
            "#,
        )
        .bind(&data.name)
        .bind(&data.isbn)
        .bind(data.published_date)
        .bind(&data.cover_image)
        .bind(&data.summary)
        .bind(data.total_copies)
        .bind(data.show_on_website)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Replace the author links of a book
    pub async fn set_authors(&self, book_id: i32, author_ids: &[i32]) -> AppResult<()> {
        sqlx::query("DELETE FROM book_authors WHERE book_id = $1")
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        for author_id in author_ids {
            sqlx::query(
                "INSERT INTO book_authors (book_id, author_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(book_id)
            .bind(author_id)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Delete a book. Its orders and author links go with it (FK cascade).
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }
}
