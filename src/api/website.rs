//! Public website flow: browse books and place orders.
//!
//! These routes are unauthenticated. Missing or unavailable books never
//! produce an error page; the visitor is redirected back to the book list.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::book::{BookDetails, BookShort},
};

const BOOKS_PATH: &str = "/library/books";

#[derive(Deserialize)]
pub struct BookDetailQuery {
    pub order_created: Option<String>,
}

#[derive(Deserialize)]
pub struct OrderForm {
    pub customer_name: Option<String>,
}

/// List of available books
pub async fn books_list(State(state): State<crate::AppState>) -> AppResult<Html<String>> {
    let books = state.services.catalog.website_books().await?;
    Ok(Html(render_books_list(&books)))
}

/// Book detail page. Unknown or unavailable books redirect to the list.
pub async fn book_detail(
    State(state): State<crate::AppState>,
    Path(book_id): Path<i32>,
    Query(query): Query<BookDetailQuery>,
) -> AppResult<Response> {
    let book = match state.services.catalog.get_book(book_id).await {
        Ok(book) => book,
        Err(AppError::NotFound(_)) => return Ok(Redirect::to(BOOKS_PATH).into_response()),
        Err(e) => return Err(e),
    };

    if !book.is_available {
        return Ok(Redirect::to(BOOKS_PATH).into_response());
    }

    Ok(Html(render_book_detail(&book, query.order_created.is_some())).into_response())
}

/// Place a draft order for a book, then return to its detail page.
pub async fn create_order(
    State(state): State<crate::AppState>,
    Path(book_id): Path<i32>,
    Form(form): Form<OrderForm>,
) -> AppResult<Response> {
    match state
        .services
        .orders
        .place_order(book_id, form.customer_name)
        .await
    {
        Ok(_) => Ok(Redirect::to(&format!("/library/book/{}?order_created=1", book_id)).into_response()),
        Err(AppError::NotFound(_)) | Err(AppError::BusinessRule(_)) => {
            Ok(Redirect::to(BOOKS_PATH).into_response())
        }
        Err(e) => Err(e),
    }
}

fn render_books_list(books: &[BookShort]) -> String {
    let mut items = String::new();
    for book in books {
        let remaining = book.total_copies - book.sold_copies;
        items.push_str(&format!(
            "    <li><a href=\"/library/book/{}\">{}</a> ({} of {} copies available)</li>\n",
            book.id,
            escape_html(&book.name),
            remaining,
            book.total_copies,
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Library - Books</title></head>\n<body>\n\
         <h1>Available Books</h1>\n<ul>\n{}</ul>\n</body>\n</html>\n",
        items
    )
}

fn render_book_detail(book: &BookDetails, order_created: bool) -> String {
    let mut body = String::new();

    if order_created {
        body.push_str("  <p class=\"success\">Your order has been received.</p>\n");
    }

    body.push_str(&format!("  <h1>{}</h1>\n", escape_html(&book.name)));

    if !book.authors.is_empty() {
        let names: Vec<String> = book.authors.iter().map(|a| escape_html(&a.name)).collect();
        body.push_str(&format!("  <p>By {}</p>\n", names.join(", ")));
    }

    if let Some(ref isbn) = book.isbn {
        body.push_str(&format!("  <p>ISBN: {}</p>\n", escape_html(isbn)));
    }

    if let Some(date) = book.published_date {
        body.push_str(&format!("  <p>Published: {}</p>\n", date));
    }

    if let Some(ref summary) = book.summary {
        body.push_str(&format!("  <p>{}</p>\n", escape_html(summary)));
    }

    body.push_str(&format!(
        "  <p>{} of {} copies available</p>\n",
        book.total_copies - book.sold_copies,
        book.total_copies,
    ));

    body.push_str(&format!(
        "  <form method=\"post\" action=\"/library/book/{}/order\">\n\
         \x20   <input type=\"text\" name=\"customer_name\" placeholder=\"Your name\"/>\n\
         \x20   <button type=\"submit\">Order this book</button>\n\
         \x20 </form>\n\
         \x20 <p><a href=\"/library/books\">Back to the book list</a></p>\n",
        book.id,
    ));

    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Library - {}</title></head>\n<body>\n{}</body>\n</html>\n",
        escape_html(&book.name),
        body
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
