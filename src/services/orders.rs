//! Order management service.
//!
//! Placing an order reserves nothing: `total_copies` is never touched and
//! the sold count only moves once an order is confirmed, so several draft
//! orders can exceed real stock until each confirmation lands.

use crate::{
    config::WebsiteConfig,
    error::{AppError, AppResult},
    models::order::{Order, OrderWithBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct OrdersService {
    repository: Repository,
    default_customer: String,
}

impl OrdersService {
    pub fn new(repository: Repository, website_config: WebsiteConfig) -> Self {
        Self {
            repository,
            default_customer: website_config.default_customer,
        }
    }

    /// List all orders with their book names
    pub async fn list_orders(&self) -> AppResult<Vec<OrderWithBook>> {
        self.repository.orders.list().await
    }

    /// Get order by ID
    pub async fn get_order(&self, id: i32) -> AppResult<Order> {
        self.repository.orders.get_by_id(id).await
    }

    /// Place a draft order for a book. The book must exist and be
    /// available at call time.
    pub async fn place_order(&self, book_id: i32, customer: Option<String>) -> AppResult<Order> {
        let book = self.repository.books.get_by_id(book_id).await?;

        if !book.is_available() {
            return Err(AppError::BusinessRule(
                "Book is not available for ordering".to_string(),
            ));
        }

        let customer = resolve_customer(customer, &self.default_customer);
        let order = self.repository.orders.create(book_id, &customer).await?;

        tracing::info!("Order {} placed for book {} by {}", order.id, book_id, customer);
        Ok(order)
    }

    /// Confirm an order, marking it sold. Availability is not re-checked
    /// at confirmation time.
    pub async fn confirm_order(&self, id: i32) -> AppResult<Order> {
        let order = self.repository.orders.confirm(id).await?;
        tracing::info!("Order {} confirmed for book {}", order.id, order.book_id);
        Ok(order)
    }

    /// Delete an order
    pub async fn delete_order(&self, id: i32) -> AppResult<()> {
        self.repository.orders.delete(id).await
    }
}

/// Customer name to record on an order, falling back to the placeholder
/// when none was given.
fn resolve_customer(customer: Option<String>, placeholder: &str) -> String {
    match customer {
        Some(name) if !name.trim().is_empty() => name,
        _ => placeholder.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_customer_is_kept() {
        assert_eq!(
            resolve_customer(Some("Ada Lovelace".to_string()), "Website Customer"),
            "Ada Lovelace"
        );
    }

    #[test]
    fn missing_customer_gets_placeholder() {
        assert_eq!(resolve_customer(None, "Website Customer"), "Website Customer");
    }

    #[test]
    fn blank_customer_gets_placeholder() {
        assert_eq!(resolve_customer(Some("".to_string()), "Website Customer"), "Website Customer");
        assert_eq!(resolve_customer(Some("   ".to_string()), "Website Customer"), "Website Customer");
    }
}
