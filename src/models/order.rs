//! Order model and lifecycle states

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Order lifecycle. `Draft` is the initial state; `Sold` is terminal,
/// there is no transition back and no cancellation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Draft,
    Sold,
}

impl OrderStatus {
    /// Return the string code stored in the database
    pub fn as_code(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Sold => "sold",
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s {
            "sold" => OrderStatus::Sold,
            _ => OrderStatus::Draft,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// Order model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub id: i32,
    pub book_id: i32,
    pub customer: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn status(&self) -> OrderStatus {
        OrderStatus::from(self.status.as_str())
    }
}

/// Order with its book's name, for admin listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderWithBook {
    pub id: i32,
    pub book_id: i32,
    pub book_name: String,
    pub customer: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Create order request (admin API)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrder {
    pub book_id: i32,
    pub customer: Option<String>,
}
