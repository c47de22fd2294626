//! Identifier newtypes and small value objects shared across the crate.
//!
//! Reference data uses integer surrogate keys (`BIGSERIAL` in the store);
//! the owning user is identified by a UUID handed to us by the external
//! identity provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
            Serialize, Deserialize, sqlx::Type,
        )]
        #[sqlx(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database id.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw database id.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a station.
    StationId
);
entity_id!(
    /// Unique identifier for a route.
    RouteId
);
entity_id!(
    /// Unique identifier for a crew member.
    CrewId
);
entity_id!(
    /// Unique identifier for a train type.
    TrainTypeId
);
entity_id!(
    /// Unique identifier for a train.
    TrainId
);
entity_id!(
    /// Unique identifier for a journey.
    JourneyId
);
entity_id!(
    /// Unique identifier for an order.
    OrderId
);
entity_id!(
    /// Unique identifier for a ticket.
    TicketId
);

/// Identifier of the user owning an order.
///
/// Supplied by the external identity provider; this crate never creates or
/// verifies users.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap a UUID supplied by the identity provider.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical seat layout of a train.
///
/// Defines the valid seat address space: cargo numbers in
/// `1..=cargo_count`, seat numbers in `1..=places_in_cargo`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct SeatLayout {
    /// Number of cargo compartments (cars).
    pub cargo_count: i32,
    /// Seats per compartment.
    pub places_in_cargo: i32,
}

impl SeatLayout {
    /// Total seat capacity of the train.
    #[must_use]
    pub const fn capacity(&self) -> i64 {
        self.cargo_count as i64 * self.places_in_cargo as i64
    }
}

/// A physical seat within a train, identified by compartment and seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatAddress {
    /// Compartment (car) number, 1-based.
    pub cargo_number: i32,
    /// Seat number within the compartment, 1-based.
    pub seat_number: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_product_of_layout() {
        let layout = SeatLayout {
            cargo_count: 2,
            places_in_cargo: 3,
        };
        assert_eq!(layout.capacity(), 6);
    }

    #[test]
    fn entity_id_roundtrip() {
        let id = JourneyId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
    }
}
