//! Free-seat computation for journeys.
//!
//! Availability is capacity minus committed tickets, read in a single SQL
//! statement so the two figures come from one snapshot. Two uncoordinated
//! reads could otherwise interleave with a concurrent booking and produce
//! transiently wrong values.

use crate::error::BookingError;
use crate::types::JourneyId;
use sqlx::PgExecutor;

/// Capacity and sold-ticket figures for one journey, from one snapshot.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
struct AvailabilityRow {
    capacity: i64,
    sold: i64,
}

/// Derive the free-seat count from a consistent (capacity, sold) pair.
///
/// A negative result means more tickets exist than seats, which the unique
/// constraint makes impossible in a healthy system. It is reported as a
/// consistency violation and logged, never clamped to zero.
///
/// # Errors
///
/// Returns [`BookingError::ConsistencyViolation`] when `sold > capacity`.
pub fn compute_available(
    journey: JourneyId,
    capacity: i64,
    sold: i64,
) -> Result<i64, BookingError> {
    let available = capacity - sold;
    if available < 0 {
        tracing::error!(
            %journey,
            capacity,
            sold,
            "journey has more tickets than seats; uniqueness invariant breached"
        );
        return Err(BookingError::ConsistencyViolation {
            journey,
            capacity,
            sold,
        });
    }
    Ok(available)
}

/// Count the remaining free seats on a journey.
///
/// Returns `None` when the journey does not exist.
///
/// # Errors
///
/// Returns a database error on query failure, or a consistency violation
/// when the snapshot shows more tickets than capacity.
pub async fn available<'e, E>(
    executor: E,
    journey: JourneyId,
) -> Result<Option<i64>, BookingError>
where
    E: PgExecutor<'e>,
{
    let row: Option<AvailabilityRow> = sqlx::query_as(
        "SELECT t.cargo_count::bigint * t.places_in_cargo::bigint AS capacity,
                COUNT(tk.id) AS sold
         FROM journeys j
         JOIN trains t ON t.id = j.train_id
         LEFT JOIN tickets tk ON tk.journey_id = j.id
         WHERE j.id = $1
         GROUP BY t.cargo_count, t.places_in_cargo",
    )
    .bind(journey)
    .fetch_optional(executor)
    .await?;

    row.map(|row| compute_available(journey, row.capacity, row.sold))
        .transpose()
}
