//! Order read shapes.
//!
//! List and detail share the same field set (`id`, `tickets`,
//! `created_at`); the detail shape is what `POST /orders` echoes back. The
//! list is owner-scoped: callers only ever see their own orders.

use crate::booking::orders::{Order, Ticket};
use crate::error::BookingError;
use crate::types::{JourneyId, OrderId, TicketId, UserId};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;

/// List the orders belonging to `user`, tickets nested.
///
/// # Errors
///
/// Returns a database error on store failure.
pub async fn list_orders(pool: &PgPool, user: UserId) -> Result<Vec<Order>, BookingError> {
    let orders: Vec<(OrderId, DateTime<Utc>)> = sqlx::query_as(
        "SELECT id, created_at FROM orders WHERE user_id = $1 ORDER BY id",
    )
    .bind(user)
    .fetch_all(pool)
    .await?;

    let ids: Vec<i64> = orders.iter().map(|(id, _)| id.get()).collect();
    let mut tickets = tickets_by_order(pool, &ids).await?;

    Ok(orders
        .into_iter()
        .map(|(id, created_at)| Order {
            id,
            tickets: tickets.remove(&id.get()).unwrap_or_default(),
            created_at,
        })
        .collect())
}

/// Tickets for a set of orders, grouped by order id, in one query.
async fn tickets_by_order(
    pool: &PgPool,
    order_ids: &[i64],
) -> Result<HashMap<i64, Vec<Ticket>>, BookingError> {
    if order_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(i64, TicketId, i32, i32, JourneyId)> = sqlx::query_as(
        "SELECT order_id, id, cargo_number, seat_number, journey_id
         FROM tickets
         WHERE order_id = ANY($1)
         ORDER BY order_id, id",
    )
    .bind(order_ids)
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<i64, Vec<Ticket>> = HashMap::new();
    for (order_id, id, cargo_number, seat_number, journey) in rows {
        grouped.entry(order_id).or_default().push(Ticket {
            id,
            cargo_number,
            seat_number,
            journey,
        });
    }
    Ok(grouped)
}
