//! API integration tests
//!
//! These run against a live server with a fresh database:
//! start one with `cargo run`, then `cargo test -- --ignored`.

use reqwest::{redirect, Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";
const SITE_URL: &str = "http://localhost:8080";

/// Client that does not follow redirects, so the website flow's
/// redirect targets can be asserted.
fn site_client() -> Client {
    Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to build client")
}

async fn create_book(client: &Client, body: Value) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to send create book request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse book response")
}

async fn get_book(client: &Client, id: i64) -> Value {
    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send get book request");

    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse book response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_and_get_author() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "name": "Ursula K. Le Guin",
            "biography": "American author of speculative fiction."
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let author_id = body["id"].as_i64().expect("No author ID");
    assert_eq!(body["book_count"], 0);

    let response = client
        .get(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Ursula K. Le Guin");
    assert!(body["books"].as_array().expect("No books array").is_empty());
}

#[tokio::test]
#[ignore]
async fn test_author_rejects_empty_name() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({ "name": "" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_book_with_stock_is_available() {
    let client = Client::new();

    let book = create_book(&client, json!({
        "name": "The Dispossessed",
        "total_copies": 3
    }))
    .await;

    assert_eq!(book["sold_copies"], 0);
    assert_eq!(book["is_available"], true);
}

#[tokio::test]
#[ignore]
async fn test_book_without_copies_is_unavailable() {
    let client = Client::new();

    let book = create_book(&client, json!({
        "name": "Out of Print Anthology",
        "total_copies": 0
    }))
    .await;

    assert_eq!(book["is_available"], false);
}

#[tokio::test]
#[ignore]
async fn test_website_flag_rejected_on_unavailable_book() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "name": "Ghost Listing",
            "total_copies": 0,
            "show_on_website": true
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"]
        .as_str()
        .expect("No message")
        .contains("unless it is available"));
}

#[tokio::test]
#[ignore]
async fn test_website_flag_accepted_on_available_book() {
    let client = Client::new();

    let book = create_book(&client, json!({
        "name": "Front Page Pick",
        "total_copies": 2,
        "show_on_website": true
    }))
    .await;

    assert_eq!(book["show_on_website"], true);
    assert_eq!(book["is_available"], true);
}

#[tokio::test]
#[ignore]
async fn test_sold_out_book_cannot_keep_website_flag() {
    let client = Client::new();

    let book = create_book(&client, json!({
        "name": "Last Copy Standing",
        "total_copies": 1
    }))
    .await;
    let book_id = book["id"].as_i64().expect("No book ID");

    // Sell the only copy
    let response = client
        .post(format!("{}/orders", BASE_URL))
        .json(&json!({ "book_id": book_id, "customer": "Morgan" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let order: Value = response.json().await.expect("Failed to parse response");
    let order_id = order["id"].as_i64().expect("No order ID");

    let response = client
        .post(format!("{}/orders/{}/confirm", BASE_URL, order_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // The book is now sold out; flagging it for the website must fail
    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "show_on_website": true }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_draft_orders_do_not_count_as_sold() {
    let client = Client::new();

    let book = create_book(&client, json!({
        "name": "Draft Counter Check",
        "total_copies": 1
    }))
    .await;
    let book_id = book["id"].as_i64().expect("No book ID");

    let response = client
        .post(format!("{}/orders", BASE_URL))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let order: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(order["status"], "draft");
    // Missing customer gets the placeholder
    assert_eq!(order["customer"], "Website Customer");

    let book = get_book(&client, book_id).await;
    assert_eq!(book["sold_copies"], 0);
    assert_eq!(book["is_available"], true);
}

#[tokio::test]
#[ignore]
async fn test_confirm_order_increments_sold_copies() {
    let client = Client::new();

    let book = create_book(&client, json!({
        "name": "Confirmation Flow",
        "total_copies": 2
    }))
    .await;
    let book_id = book["id"].as_i64().expect("No book ID");

    let response = client
        .post(format!("{}/orders", BASE_URL))
        .json(&json!({ "book_id": book_id, "customer": "Robin" }))
        .send()
        .await
        .expect("Failed to send request");
    let order: Value = response.json().await.expect("Failed to parse response");
    let order_id = order["id"].as_i64().expect("No order ID");

    let response = client
        .post(format!("{}/orders/{}/confirm", BASE_URL, order_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let confirmed: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(confirmed["status"], "sold");

    let book = get_book(&client, book_id).await;
    assert_eq!(book["sold_copies"], 1);
    assert_eq!(book["order_count"], 1);
    // Ordering never touches the stocked total
    assert_eq!(book["total_copies"], 2);
    assert_eq!(book["is_available"], true);
}

#[tokio::test]
#[ignore]
async fn test_order_rejected_for_unavailable_book() {
    let client = Client::new();

    let book = create_book(&client, json!({
        "name": "Nothing In Stock",
        "total_copies": 0
    }))
    .await;
    let book_id = book["id"].as_i64().expect("No book ID");

    let response = client
        .post(format!("{}/orders", BASE_URL))
        .json(&json!({ "book_id": book_id, "customer": "Sam" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);

    // No order was created for the book
    let response = client
        .get(format!("{}/books/{}/orders", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let orders: Value = response.json().await.expect("Failed to parse response");
    assert!(orders.as_array().expect("No orders array").is_empty());
}

#[tokio::test]
#[ignore]
async fn test_website_lists_available_books() {
    let client = Client::new();

    create_book(&client, json!({
        "name": "Shown On The Site",
        "total_copies": 4
    }))
    .await;

    let response = client
        .get(format!("{}/library/books", SITE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let page = response.text().await.expect("Failed to read page");
    assert!(page.contains("Shown On The Site"));
}

#[tokio::test]
#[ignore]
async fn test_website_detail_redirects_when_unavailable() {
    let api = Client::new();
    let site = site_client();

    let book = create_book(&api, json!({
        "name": "Hidden From The Site",
        "total_copies": 0
    }))
    .await;
    let book_id = book["id"].as_i64().expect("No book ID");

    let response = site
        .get(format!("{}/library/book/{}", SITE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()["location"].to_str().expect("Bad location"),
        "/library/books"
    );

    // Unknown books take the same redirect
    let response = site
        .get(format!("{}/library/book/999999", SITE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
#[ignore]
async fn test_website_order_flow() {
    let api = Client::new();
    let site = site_client();

    let book = create_book(&api, json!({
        "name": "Orderable Online",
        "total_copies": 5
    }))
    .await;
    let book_id = book["id"].as_i64().expect("No book ID");

    let response = site
        .post(format!("{}/library/book/{}/order", SITE_URL, book_id))
        .form(&[("customer_name", "Alice")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()["location"].to_str().expect("Bad location"),
        format!("/library/book/{}?order_created=1", book_id)
    );

    // The draft order exists with the submitted customer name
    let response = api
        .get(format!("{}/books/{}/orders", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let orders: Value = response.json().await.expect("Failed to parse response");
    let orders = orders.as_array().expect("No orders array");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["customer"], "Alice");
    assert_eq!(orders[0]["status"], "draft");
}

#[tokio::test]
#[ignore]
async fn test_website_order_on_unavailable_book_redirects_to_list() {
    let api = Client::new();
    let site = site_client();

    let book = create_book(&api, json!({
        "name": "Cannot Order This",
        "total_copies": 0
    }))
    .await;
    let book_id = book["id"].as_i64().expect("No book ID");

    let response = site
        .post(format!("{}/library/book/{}/order", SITE_URL, book_id))
        .form(&[("customer_name", "Eve")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()["location"].to_str().expect("Bad location"),
        "/library/books"
    );

    let response = api
        .get(format!("{}/books/{}/orders", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let orders: Value = response.json().await.expect("Failed to parse response");
    assert!(orders.as_array().expect("No orders array").is_empty());
}

#[tokio::test]
#[ignore]
async fn test_book_author_links() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({ "name": "Frank Herbert" }))
        .send()
        .await
        .expect("Failed to send request");
    let author: Value = response.json().await.expect("Failed to parse response");
    let author_id = author["id"].as_i64().expect("No author ID");

    let book = create_book(&client, json!({
        "name": "Dune",
        "author_ids": [author_id],
        "total_copies": 2
    }))
    .await;

    let authors = book["authors"].as_array().expect("No authors array");
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0]["name"], "Frank Herbert");

    // The author's live book count follows the link
    let response = client
        .get(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    let author: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(author["book_count"], 1);
    assert_eq!(author["books"].as_array().expect("No books array").len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_delete_book_removes_its_orders() {
    let client = Client::new();

    let book = create_book(&client, json!({
        "name": "Short Lived",
        "total_copies": 1
    }))
    .await;
    let book_id = book["id"].as_i64().expect("No book ID");

    let response = client
        .post(format!("{}/orders", BASE_URL))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    let order: Value = response.json().await.expect("Failed to parse response");
    let order_id = order["id"].as_i64().expect("No order ID");

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/orders/{}", BASE_URL, order_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}
