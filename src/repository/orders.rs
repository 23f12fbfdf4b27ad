//! Orders repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::order::{Order, OrderStatus, OrderWithBook},
};

#[derive(Clone)]
pub struct OrdersRepository {
    pool: Pool<Postgres>,
}

impl OrdersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get order by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Order> {
        sqlx::query_as::<_, Order>(
            "SELECT id, book_id, customer, status, created_at FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order with id {} not found", id)))
    }

    /// List all orders with their book names, newest first
    pub async fn list(&self) -> AppResult<Vec<OrderWithBook>> {
        let orders = sqlx::query_as::<_, OrderWithBook>(
            r#"
            SELECT o.id, o.book_id, b.name AS book_name, o.customer, o.status, o.created_at
            FROM orders o
            JOIN books b ON b.id = o.book_id
            ORDER BY o.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Create a new draft order for a book
    pub async fn create(&self, book_id: i32, customer: &str) -> AppResult<Order> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (book_id, customer, status, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, book_id, customer, status, created_at
            "#,
        )
        .bind(book_id)
        .bind(customer)
        .bind(OrderStatus::Draft.as_code())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    /// Mark an order as sold. Already-sold orders stay sold.
    pub async fn confirm(&self, id: i32) -> AppResult<Order> {
        sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders SET status = $1 WHERE id = $2
            RETURNING id, book_id, customer, status, created_at
            "#,
        )
        .bind(OrderStatus::Sold.as_code())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order with id {} not found", id)))
    }

    /// Delete an order
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Order with id {} not found", id)));
        }

        Ok(())
    }
}
