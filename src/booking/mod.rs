//! The seat-booking invariant core.
//!
//! Three collaborating pieces:
//!
//! - [`validator`]: pure range checks of a seat address against a train's
//!   physical layout, with per-field error aggregation.
//! - [`availability`]: free-seat computation from a single consistent
//!   snapshot of capacity and ticket count.
//! - [`orders`]: the only write path, atomic multi-ticket order creation
//!   under the store-enforced seat uniqueness constraint.

pub mod availability;
pub mod orders;
pub mod validator;

pub use availability::available;
pub use orders::{Order, Ticket, TicketRequest, create_order};
pub use validator::validate_seat;
