//! Reference data store: stations, routes, crews, train types, trains and
//! journeys.
//!
//! Plain create/list persistence with no invariants beyond foreign-key
//! integrity, which the schema enforces (deletes cascade to dependents).
//! Neither `source != destination` on routes nor `departure < arrival` on
//! journeys is checked; both are open product questions and the store stays
//! permissive until they are settled.

use crate::types::{CrewId, JourneyId, RouteId, StationId, TrainId, TrainTypeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

// ============================================================================
// Stations
// ============================================================================

/// A railway station.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Station {
    /// Station id.
    pub id: StationId,
    /// Station name.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// Payload for creating a station.
#[derive(Debug, Deserialize)]
pub struct NewStation {
    /// Station name.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// Insert a station.
///
/// # Errors
///
/// Returns a database error on store failure.
pub async fn create_station(pool: &PgPool, station: &NewStation) -> sqlx::Result<Station> {
    sqlx::query_as(
        "INSERT INTO stations (name, latitude, longitude)
         VALUES ($1, $2, $3)
         RETURNING id, name, latitude, longitude",
    )
    .bind(&station.name)
    .bind(station.latitude)
    .bind(station.longitude)
    .fetch_one(pool)
    .await
}

/// List all stations.
///
/// # Errors
///
/// Returns a database error on store failure.
pub async fn list_stations(pool: &PgPool) -> sqlx::Result<Vec<Station>> {
    sqlx::query_as("SELECT id, name, latitude, longitude FROM stations ORDER BY id")
        .fetch_all(pool)
        .await
}

// ============================================================================
// Crews
// ============================================================================

/// A crew member.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Crew {
    /// Crew member id.
    pub id: CrewId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
}

impl Crew {
    /// Display form, `"{first_name} {last_name}"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for creating a crew member.
#[derive(Debug, Deserialize)]
pub struct NewCrew {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
}

/// Insert a crew member.
///
/// # Errors
///
/// Returns a database error on store failure.
pub async fn create_crew(pool: &PgPool, crew: &NewCrew) -> sqlx::Result<Crew> {
    sqlx::query_as(
        "INSERT INTO crews (first_name, last_name)
         VALUES ($1, $2)
         RETURNING id, first_name, last_name",
    )
    .bind(&crew.first_name)
    .bind(&crew.last_name)
    .fetch_one(pool)
    .await
}

/// List all crew members.
///
/// # Errors
///
/// Returns a database error on store failure.
pub async fn list_crews(pool: &PgPool) -> sqlx::Result<Vec<Crew>> {
    sqlx::query_as("SELECT id, first_name, last_name FROM crews ORDER BY id")
        .fetch_all(pool)
        .await
}

// ============================================================================
// Train types
// ============================================================================

/// A train classification (express, freight, ...).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TrainType {
    /// Train type id.
    pub id: TrainTypeId,
    /// Type name.
    pub name: String,
}

/// Payload for creating a train type.
#[derive(Debug, Deserialize)]
pub struct NewTrainType {
    /// Type name.
    pub name: String,
}

/// Insert a train type.
///
/// # Errors
///
/// Returns a database error on store failure.
pub async fn create_train_type(pool: &PgPool, train_type: &NewTrainType) -> sqlx::Result<TrainType> {
    sqlx::query_as("INSERT INTO train_types (name) VALUES ($1) RETURNING id, name")
        .bind(&train_type.name)
        .fetch_one(pool)
        .await
}

/// List all train types.
///
/// # Errors
///
/// Returns a database error on store failure.
pub async fn list_train_types(pool: &PgPool) -> sqlx::Result<Vec<TrainType>> {
    sqlx::query_as("SELECT id, name FROM train_types ORDER BY id")
        .fetch_all(pool)
        .await
}

// ============================================================================
// Trains
// ============================================================================

/// A train and its physical seat layout.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Train {
    /// Train id.
    pub id: TrainId,
    /// Train name.
    pub name: String,
    /// Number of cargo compartments.
    pub cargo_count: i32,
    /// Seats per compartment.
    pub places_in_cargo: i32,
    /// Optional classification.
    #[sqlx(rename = "train_type_id")]
    pub train_type: Option<TrainTypeId>,
}

/// Payload for creating a train.
#[derive(Debug, Deserialize)]
pub struct NewTrain {
    /// Train name.
    pub name: String,
    /// Number of cargo compartments.
    pub cargo_count: i32,
    /// Seats per compartment.
    pub places_in_cargo: i32,
    /// Optional classification.
    #[serde(default)]
    pub train_type: Option<TrainTypeId>,
}

/// Insert a train.
///
/// # Errors
///
/// Returns a database error on store failure, including foreign-key
/// violations for an unknown train type.
pub async fn create_train(pool: &PgPool, train: &NewTrain) -> sqlx::Result<Train> {
    sqlx::query_as(
        "INSERT INTO trains (name, cargo_count, places_in_cargo, train_type_id)
         VALUES ($1, $2, $3, $4)
         RETURNING id, name, cargo_count, places_in_cargo, train_type_id",
    )
    .bind(&train.name)
    .bind(train.cargo_count)
    .bind(train.places_in_cargo)
    .bind(train.train_type)
    .fetch_one(pool)
    .await
}

/// List trains, optionally restricted to the given train types.
///
/// # Errors
///
/// Returns a database error on store failure.
pub async fn list_trains(pool: &PgPool, train_types: Option<&[i64]>) -> sqlx::Result<Vec<Train>> {
    match train_types {
        Some(ids) => {
            sqlx::query_as(
                "SELECT id, name, cargo_count, places_in_cargo, train_type_id
                 FROM trains
                 WHERE train_type_id = ANY($1)
                 ORDER BY id",
            )
            .bind(ids)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as(
                "SELECT id, name, cargo_count, places_in_cargo, train_type_id
                 FROM trains
                 ORDER BY id",
            )
            .fetch_all(pool)
            .await
        }
    }
}

/// Fetch a single train.
///
/// # Errors
///
/// Returns a database error on store failure.
pub async fn get_train(pool: &PgPool, id: TrainId) -> sqlx::Result<Option<Train>> {
    sqlx::query_as(
        "SELECT id, name, cargo_count, places_in_cargo, train_type_id
         FROM trains
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

// ============================================================================
// Routes
// ============================================================================

/// A route between two stations, with station names resolved for display.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Route {
    /// Route id.
    pub id: RouteId,
    /// Source station name.
    pub source: String,
    /// Destination station name.
    pub destination: String,
    /// Distance between the stations.
    pub distance: f64,
}

/// Payload for creating a route, referencing stations by id.
#[derive(Debug, Deserialize)]
pub struct NewRoute {
    /// Source station.
    pub source: StationId,
    /// Destination station.
    pub destination: StationId,
    /// Distance between the stations.
    pub distance: f64,
}

const ROUTE_SELECT: &str = "SELECT r.id,
        s.name AS source,
        d.name AS destination,
        r.distance
 FROM routes r
 JOIN stations s ON s.id = r.source_id
 JOIN stations d ON d.id = r.destination_id";

/// Insert a route.
///
/// # Errors
///
/// Returns a database error on store failure, including foreign-key
/// violations for unknown stations.
pub async fn create_route(pool: &PgPool, route: &NewRoute) -> sqlx::Result<Route> {
    let (id,): (RouteId,) = sqlx::query_as(
        "INSERT INTO routes (source_id, destination_id, distance)
         VALUES ($1, $2, $3)
         RETURNING id",
    )
    .bind(route.source)
    .bind(route.destination)
    .bind(route.distance)
    .fetch_one(pool)
    .await?;

    sqlx::query_as(&format!("{ROUTE_SELECT} WHERE r.id = $1"))
        .bind(id)
        .fetch_one(pool)
        .await
}

/// List routes, optionally restricted to the given source stations.
///
/// # Errors
///
/// Returns a database error on store failure.
pub async fn list_routes(pool: &PgPool, sources: Option<&[i64]>) -> sqlx::Result<Vec<Route>> {
    match sources {
        Some(ids) => {
            sqlx::query_as(&format!(
                "{ROUTE_SELECT} WHERE r.source_id = ANY($1) ORDER BY r.id"
            ))
            .bind(ids)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as(&format!("{ROUTE_SELECT} ORDER BY r.id"))
                .fetch_all(pool)
                .await
        }
    }
}

// ============================================================================
// Journeys
// ============================================================================

/// A journey in its write representation: foreign keys, not display forms.
#[derive(Debug, Clone, Serialize)]
pub struct Journey {
    /// Journey id.
    pub id: JourneyId,
    /// Route the journey runs over.
    pub route: RouteId,
    /// Train assigned to the journey.
    pub train: TrainId,
    /// Scheduled departure.
    pub departure_time: DateTime<Utc>,
    /// Scheduled arrival.
    pub arrival_time: DateTime<Utc>,
    /// Assigned crew members.
    pub crew: Vec<CrewId>,
}

/// Payload for creating a journey.
#[derive(Debug, Deserialize)]
pub struct NewJourney {
    /// Route the journey runs over.
    pub route: RouteId,
    /// Train assigned to the journey.
    pub train: TrainId,
    /// Scheduled departure.
    pub departure_time: DateTime<Utc>,
    /// Scheduled arrival.
    pub arrival_time: DateTime<Utc>,
    /// Assigned crew members.
    #[serde(default)]
    pub crew: Vec<CrewId>,
}

/// Insert a journey together with its crew assignments, atomically.
///
/// # Errors
///
/// Returns a database error on store failure, including foreign-key
/// violations for unknown routes, trains or crew members.
pub async fn create_journey(pool: &PgPool, journey: &NewJourney) -> sqlx::Result<Journey> {
    let mut tx = pool.begin().await?;

    let (id,): (JourneyId,) = sqlx::query_as(
        "INSERT INTO journeys (route_id, train_id, departure_time, arrival_time)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(journey.route)
    .bind(journey.train)
    .bind(journey.departure_time)
    .bind(journey.arrival_time)
    .fetch_one(&mut *tx)
    .await?;

    for crew in &journey.crew {
        sqlx::query("INSERT INTO journey_crew (journey_id, crew_id) VALUES ($1, $2)")
            .bind(id)
            .bind(crew)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(Journey {
        id,
        route: journey.route,
        train: journey.train,
        departure_time: journey.departure_time,
        arrival_time: journey.arrival_time,
        crew: journey.crew.clone(),
    })
}
