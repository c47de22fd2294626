//! Atomic multi-ticket order creation.
//!
//! This is the only write path that touches the seat uniqueness invariant.
//! The whole batch runs inside one transaction: either the order row and
//! every ticket land together, or nothing does. Seat uniqueness is enforced
//! by the store's `tickets_seat_unique` constraint rather than an
//! application-level check-then-insert, so two concurrent requests for the
//! same seat race on the index and exactly one of them commits.

use crate::booking::validator::validate_seat;
use crate::error::{BookingError, FieldErrors};
use crate::types::{JourneyId, OrderId, SeatLayout, TicketId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;

/// One requested seat within an order batch.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TicketRequest {
    /// Compartment number, 1-based.
    pub cargo_number: i32,
    /// Seat number within the compartment, 1-based.
    pub seat_number: i32,
    /// Journey the seat is requested on.
    pub journey: JourneyId,
}

/// A committed ticket.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Ticket {
    /// Ticket id.
    pub id: TicketId,
    /// Compartment number.
    pub cargo_number: i32,
    /// Seat number.
    pub seat_number: i32,
    /// Journey the ticket is valid for.
    #[sqlx(rename = "journey_id")]
    pub journey: JourneyId,
}

/// A committed order with its tickets.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Order id.
    pub id: OrderId,
    /// The order's tickets, in request order.
    pub tickets: Vec<Ticket>,
    /// Creation timestamp, set once by the store.
    pub created_at: DateTime<Utc>,
}

/// Create an order with its tickets, all-or-nothing.
///
/// Every request in the batch is validated against its journey's train
/// layout and inserted under the seat uniqueness constraint. The first
/// failure aborts the transaction; no order and no ticket from this call
/// survive. Failures carry the zero-based position of the offending
/// request.
///
/// # Errors
///
/// - [`BookingError::EmptyOrder`] when `requests` is empty.
/// - [`BookingError::InvalidTicket`] when a seat address is outside the
///   train's layout or the journey does not exist.
/// - [`BookingError::SeatTaken`] when the seat is already ticketed, by a
///   prior order or by an earlier request in this same batch.
/// - [`BookingError::Database`] on any other store failure.
#[tracing::instrument(skip(pool, requests), fields(user = %user, tickets = requests.len()))]
pub async fn create_order(
    pool: &PgPool,
    user: UserId,
    requests: &[TicketRequest],
) -> Result<Order, BookingError> {
    if requests.is_empty() {
        return Err(BookingError::EmptyOrder);
    }

    let mut tx = pool.begin().await?;

    let (order_id, created_at): (OrderId, DateTime<Utc>) =
        sqlx::query_as("INSERT INTO orders (user_id) VALUES ($1) RETURNING id, created_at")
            .bind(user)
            .fetch_one(&mut *tx)
            .await?;

    // Journeys repeat within a batch; resolve each layout once.
    let mut layouts: HashMap<JourneyId, SeatLayout> = HashMap::new();
    let mut tickets = Vec::with_capacity(requests.len());

    for (index, request) in requests.iter().enumerate() {
        let layout = if let Some(layout) = layouts.get(&request.journey).copied() {
            layout
        } else {
            let layout: Option<SeatLayout> = sqlx::query_as(
                "SELECT t.cargo_count, t.places_in_cargo
                 FROM journeys j
                 JOIN trains t ON t.id = j.train_id
                 WHERE j.id = $1",
            )
            .bind(request.journey)
            .fetch_optional(&mut *tx)
            .await?;

            let Some(layout) = layout else {
                let mut fields = FieldErrors::new();
                fields.insert(
                    "journey",
                    format!("journey {} does not exist", request.journey),
                );
                return Err(BookingError::InvalidTicket { index, fields });
            };
            layouts.insert(request.journey, layout);
            layout
        };

        validate_seat(request.cargo_number, request.seat_number, &layout)
            .map_err(|fields| BookingError::InvalidTicket { index, fields })?;

        let ticket: Ticket = sqlx::query_as(
            "INSERT INTO tickets (cargo_number, seat_number, journey_id, order_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, cargo_number, seat_number, journey_id",
        )
        .bind(request.cargo_number)
        .bind(request.seat_number)
        .bind(request.journey)
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| seat_conflict(err, index, request))?;

        tickets.push(ticket);
    }

    tx.commit().await?;

    tracing::debug!(order = %order_id, tickets = tickets.len(), "order committed");

    Ok(Order {
        id: order_id,
        tickets,
        created_at,
    })
}

/// Map a unique-constraint violation on the ticket insert to `SeatTaken`,
/// tied to the offending request's position.
fn seat_conflict(err: sqlx::Error, index: usize, request: &TicketRequest) -> BookingError {
    let is_unique = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if is_unique {
        BookingError::SeatTaken {
            index,
            cargo_number: request.cargo_number,
            seat_number: request.seat_number,
            journey: request.journey,
        }
    } else {
        BookingError::Database(err)
    }
}
