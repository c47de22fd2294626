//! Journey read shapes.
//!
//! The list shape renders related records as display strings and annotates
//! every journey with `tickets_available`, computed for the whole result
//! set in one grouped query rather than once per row. The detail shape
//! resolves the route to its canonical `"source → destination"` form and
//! includes the taken seat addresses.

use crate::booking::availability::compute_available;
use crate::catalog::Crew;
use crate::error::BookingError;
use crate::types::{JourneyId, SeatAddress};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;

/// Compact journey representation for list views.
#[derive(Debug, Clone, Serialize)]
pub struct JourneyListItem {
    /// Journey id.
    pub id: JourneyId,
    /// Route display string, `"source → destination"`.
    pub route: String,
    /// Train display string.
    pub train: String,
    /// Crew display strings.
    pub crew: Vec<String>,
    /// Scheduled departure.
    pub departure_time: DateTime<Utc>,
    /// Scheduled arrival.
    pub arrival_time: DateTime<Utc>,
    /// Remaining free seats.
    pub tickets_available: i64,
}

/// Resolved journey representation for detail views.
#[derive(Debug, Clone, Serialize)]
pub struct JourneyDetail {
    /// Journey id.
    pub id: JourneyId,
    /// Route in canonical `"source → destination"` form.
    pub route: String,
    /// Train display string.
    pub train: String,
    /// Full crew records.
    pub crew: Vec<Crew>,
    /// Scheduled departure.
    pub departure_time: DateTime<Utc>,
    /// Scheduled arrival.
    pub arrival_time: DateTime<Utc>,
    /// Seat addresses already ticketed on this journey.
    pub taken_seats: Vec<SeatAddress>,
}

#[derive(Debug, sqlx::FromRow)]
struct JourneyListRow {
    id: JourneyId,
    route: String,
    train: String,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    capacity: i64,
    sold: i64,
}

/// List all journeys in the compact shape, availability included.
///
/// # Errors
///
/// Returns a database error on store failure, or a consistency violation
/// when any journey shows more tickets than capacity.
pub async fn list_journeys(pool: &PgPool) -> Result<Vec<JourneyListItem>, BookingError> {
    let rows: Vec<JourneyListRow> = sqlx::query_as(
        "SELECT j.id,
                s.name || ' → ' || d.name AS route,
                t.name AS train,
                j.departure_time,
                j.arrival_time,
                t.cargo_count::bigint * t.places_in_cargo::bigint AS capacity,
                COUNT(tk.id) AS sold
         FROM journeys j
         JOIN routes r ON r.id = j.route_id
         JOIN stations s ON s.id = r.source_id
         JOIN stations d ON d.id = r.destination_id
         JOIN trains t ON t.id = j.train_id
         LEFT JOIN tickets tk ON tk.journey_id = j.id
         GROUP BY j.id, s.name, d.name, t.name, t.cargo_count, t.places_in_cargo
         ORDER BY j.id",
    )
    .fetch_all(pool)
    .await?;

    let ids: Vec<i64> = rows.iter().map(|row| row.id.get()).collect();
    let mut crew_names = crew_names_by_journey(pool, &ids).await?;

    rows.into_iter()
        .map(|row| {
            let tickets_available = compute_available(row.id, row.capacity, row.sold)?;
            Ok(JourneyListItem {
                id: row.id,
                route: row.route,
                train: row.train,
                crew: crew_names.remove(&row.id.get()).unwrap_or_default(),
                departure_time: row.departure_time,
                arrival_time: row.arrival_time,
                tickets_available,
            })
        })
        .collect()
}

/// Fetch one journey in the resolved detail shape.
///
/// Returns `None` when the journey does not exist.
///
/// # Errors
///
/// Returns a database error on store failure.
pub async fn journey_detail(
    pool: &PgPool,
    id: JourneyId,
) -> Result<Option<JourneyDetail>, BookingError> {
    let row: Option<(String, String, DateTime<Utc>, DateTime<Utc>)> = sqlx::query_as(
        "SELECT s.name || ' → ' || d.name AS route,
                t.name AS train,
                j.departure_time,
                j.arrival_time
         FROM journeys j
         JOIN routes r ON r.id = j.route_id
         JOIN stations s ON s.id = r.source_id
         JOIN stations d ON d.id = r.destination_id
         JOIN trains t ON t.id = j.train_id
         WHERE j.id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some((route, train, departure_time, arrival_time)) = row else {
        return Ok(None);
    };

    let crew: Vec<Crew> = sqlx::query_as(
        "SELECT c.id, c.first_name, c.last_name
         FROM journey_crew jc
         JOIN crews c ON c.id = jc.crew_id
         WHERE jc.journey_id = $1
         ORDER BY c.id",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let taken: Vec<(i32, i32)> = sqlx::query_as(
        "SELECT cargo_number, seat_number
         FROM tickets
         WHERE journey_id = $1
         ORDER BY cargo_number, seat_number",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let taken_seats = taken
        .into_iter()
        .map(|(cargo_number, seat_number)| SeatAddress {
            cargo_number,
            seat_number,
        })
        .collect();

    Ok(Some(JourneyDetail {
        id,
        route,
        train,
        crew,
        departure_time,
        arrival_time,
        taken_seats,
    }))
}

/// Crew display strings for a set of journeys, grouped by journey id.
async fn crew_names_by_journey(
    pool: &PgPool,
    journey_ids: &[i64],
) -> Result<HashMap<i64, Vec<String>>, BookingError> {
    if journey_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(i64, String)> = sqlx::query_as(
        "SELECT jc.journey_id, c.first_name || ' ' || c.last_name AS full_name
         FROM journey_crew jc
         JOIN crews c ON c.id = jc.crew_id
         WHERE jc.journey_id = ANY($1)
         ORDER BY jc.journey_id, c.id",
    )
    .bind(journey_ids)
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
    for (journey_id, full_name) in rows {
        grouped.entry(journey_id).or_default().push(full_name);
    }
    Ok(grouped)
}
