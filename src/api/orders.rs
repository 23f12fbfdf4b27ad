//! Order management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::order::{CreateOrder, Order, OrderWithBook},
};

/// List all orders
#[utoipa::path(
    get,
    path = "/orders",
    tag = "orders",
    responses(
        (status = 200, description = "List of orders", body = Vec<OrderWithBook>)
    )
)]
pub async fn list_orders(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<OrderWithBook>>> {
    let orders = state.services.orders.list_orders().await?;
    Ok(Json(orders))
}

/// Get order by ID
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "orders",
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order details", body = Order),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Order>> {
    let order = state.services.orders.get_order(id).await?;
    Ok(Json(order))
}

/// Create a draft order for a book
#[utoipa::path(
    post,
    path = "/orders",
    tag = "orders",
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Book is not available")
    )
)]
pub async fn create_order(
    State(state): State<crate::AppState>,
    Json(order): Json<CreateOrder>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let created = state
        .services
        .orders
        .place_order(order.book_id, order.customer)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Confirm an order, marking it sold
#[utoipa::path(
    post,
    path = "/orders/{id}/confirm",
    tag = "orders",
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order confirmed", body = Order),
        (status = 404, description = "Order not found")
    )
)]
pub async fn confirm_order(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Order>> {
    let order = state.services.orders.confirm_order(id).await?;
    Ok(Json(order))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "orders",
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn delete_order(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.orders.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
