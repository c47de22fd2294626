//! Read shapes for the HTTP surface.
//!
//! Each entity gets explicit, named projections selected by call-site
//! intent: a compact list shape and a resolved detail shape. The shapes are
//! built by dedicated queries rather than by reusing the write
//! representations.

pub mod journeys;
pub mod orders;

pub use journeys::{JourneyDetail, JourneyListItem, journey_detail, list_journeys};
pub use orders::list_orders;
