//! Seat address validation against a train's physical layout.

use crate::error::FieldErrors;
use crate::types::SeatLayout;

/// Validate a proposed seat address against a train layout.
///
/// Checks that `cargo_number` lies in `1..=cargo_count` and `seat_number`
/// in `1..=places_in_cargo`. Both checks always run, even when the first
/// one already failed, so callers get every field-level problem in one
/// pass. No side effects.
///
/// # Errors
///
/// Returns a field → message map naming the valid range for each field
/// that is out of bounds.
pub fn validate_seat(
    cargo_number: i32,
    seat_number: i32,
    layout: &SeatLayout,
) -> Result<(), FieldErrors> {
    let mut fields = FieldErrors::new();
    for (value, field, limit) in [
        (cargo_number, "cargo_number", layout.cargo_count),
        (seat_number, "seat_number", layout.places_in_cargo),
    ] {
        if !(1..=limit).contains(&value) {
            fields.insert(field, format!("{field} must be between 1 and {limit}"));
        }
    }

    if fields.is_empty() { Ok(()) } else { Err(fields) }
}
