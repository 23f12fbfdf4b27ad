//! Catalog management service: authors and books.
//!
//! All book writes pass the website-visibility check before anything is
//! persisted: a book may not carry `show_on_website` while the prospective
//! state is unavailable.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorDetails, CreateAuthor, UpdateAuthor},
        book::{
            availability, website_visibility_ok, BookData, BookDetails, BookQuery, BookShort,
            CreateBook, UpdateBook,
        },
        order::Order,
    },
    repository::Repository,
};

const WEBSITE_VISIBILITY_MSG: &str =
    "You cannot display a book on the website unless it is available.";

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // =========================================================================
    // Authors
    // =========================================================================

    /// List all authors
    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    /// Get an author with its related books
    pub async fn get_author(&self, id: i32) -> AppResult<AuthorDetails> {
        let author = self.repository.authors.get_by_id(id).await?;
        let books = self.repository.authors.books_for_author(id).await?;
        Ok(AuthorDetails::from_author(author, books))
    }

    /// Create a new author
    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        author
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.repository
            .authors
            .create(&author.name, author.biography.as_deref())
            .await
    }

    /// Update an existing author
    pub async fn update_author(&self, id: i32, update: UpdateAuthor) -> AppResult<Author> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = self.repository.authors.get_by_id(id).await?;
        let name = update.name.unwrap_or(existing.name);
        let biography = update.biography.or(existing.biography);

        self.repository
            .authors
            .update(id, &name, biography.as_deref())
            .await
    }

    /// Delete an author. Its books survive; only the links are removed.
    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }

    // =========================================================================
    // Books
    // =========================================================================

    /// Search books with filters
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<(Vec<BookShort>, i64)> {
        self.repository.books.search(query).await
    }

    /// Books shown on the public website: those currently available
    pub async fn website_books(&self) -> AppResult<Vec<BookShort>> {
        let books = self.repository.books.list_all().await?;
        Ok(books.into_iter().filter(|b| b.is_available).collect())
    }

    /// Get book by ID with full details
    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        let book = self.repository.books.get_by_id(id).await?;
        let authors = self.repository.books.authors_for_book(id).await?;
        Ok(BookDetails::from_book(book, authors))
    }

    /// List all orders of a book
    pub async fn book_orders(&self, book_id: i32) -> AppResult<Vec<Order>> {
        // Verify book exists
        self.repository.books.get_by_id(book_id).await?;
        self.repository.books.orders_for_book(book_id).await
    }

    /// Create a new book
    pub async fn create_book(&self, book: CreateBook) -> AppResult<BookDetails> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // Verify referenced authors exist
        for author_id in &book.author_ids {
            self.repository.authors.get_by_id(*author_id).await?;
        }

        let data = BookData {
            name: book.name,
            isbn: book.isbn,
            published_date: book.published_date,
            cover_image: decode_cover(book.cover_image.as_deref())?,
            summary: book.summary,
            total_copies: book.total_copies,
            show_on_website: book.show_on_website,
        };

        // A new book has no orders yet, so availability is over zero sold copies
        let is_available = availability(data.total_copies, 0);
        if !website_visibility_ok(data.show_on_website, is_available) {
            return Err(AppError::Validation(WEBSITE_VISIBILITY_MSG.to_string()));
        }

        let created = self.repository.books.create(&data).await?;
        self.repository
            .books
            .set_authors(created.id, &book.author_ids)
            .await?;

        tracing::info!("Book {} created: {}", created.id, data.name);
        self.get_book(created.id).await
    }

    /// Update an existing book. Omitted fields keep their stored values.
    pub async fn update_book(&self, id: i32, update: UpdateBook) -> AppResult<BookDetails> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = self.repository.books.get_by_id(id).await?;
        let sold_copies = existing.sold_copies;

        if let Some(ref author_ids) = update.author_ids {
            for author_id in author_ids {
                self.repository.authors.get_by_id(*author_id).await?;
            }
        }

        let cover_image = match update.cover_image.as_deref() {
            Some(encoded) => decode_cover(Some(encoded))?,
            None => existing.cover_image,
        };

        let data = BookData {
            name: update.name.unwrap_or(existing.name),
            isbn: update.isbn.or(existing.isbn),
            published_date: update.published_date.or(existing.published_date),
            cover_image,
            summary: update.summary.or(existing.summary),
            total_copies: update.total_copies.unwrap_or(existing.total_copies),
            show_on_website: update.show_on_website.unwrap_or(existing.show_on_website),
        };

        // Prospective availability over the live sold count
        let is_available = availability(data.total_copies, sold_copies);
        if !website_visibility_ok(data.show_on_website, is_available) {
            return Err(AppError::Validation(WEBSITE_VISIBILITY_MSG.to_string()));
        }

        self.repository.books.update(id, &data).await?;

        if let Some(ref author_ids) = update.author_ids {
            self.repository.books.set_authors(id, author_ids).await?;
        }

        self.get_book(id).await
    }

    /// Delete a book and, through it, its orders
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }
}

/// Decode a base64 cover image payload. Empty strings clear the cover.
fn decode_cover(cover: Option<&str>) -> AppResult<Option<Vec<u8>>> {
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    match cover {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => STANDARD
            .decode(s)
            .map(Some)
            .map_err(|_| AppError::BadRequest("cover_image is not valid base64".to_string())),
    }
}
