//! Train station booking service.
//!
//! Models stations, routes, trains, journeys, crews and ticket orders, and
//! exposes them over HTTP. The heart of the crate is the seat-booking
//! core in [`booking`]:
//!
//! - seat addresses are validated against the train's physical layout with
//!   per-field error aggregation;
//! - availability is capacity minus sold tickets, read from one snapshot;
//! - orders commit all their tickets in a single transaction, with seat
//!   uniqueness enforced by the store's unique index so concurrent
//!   requests for the same seat cannot both succeed.
//!
//! ```text
//!             ┌────────────┐   ┌──────────────┐
//!  HTTP ────▶ │  api/      │──▶│  booking/    │──▶ Postgres
//!             │  handlers  │   │  (write path)│    (unique index +
//!             └────────────┘   └──────────────┘     transactions)
//!                    │         ┌──────────────┐
//!                    └────────▶│  queries/    │──▶ read shapes
//!                              │  catalog     │
//!                              └──────────────┘
//! ```
//!
//! Authentication, payments and scheduling are external collaborators; the
//! service only consumes a caller identity at the boundary (see [`auth`]).

pub mod api;
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod queries;
pub mod server;
pub mod types;

pub use config::Config;
pub use error::{AppError, BookingError};
pub use server::{AppState, build_router};
