//! HTTP handlers, one module per resource.

pub mod crews;
pub mod journeys;
pub mod orders;
pub mod routes;
pub mod stations;
pub mod train_types;
pub mod trains;

use crate::error::AppError;

/// Parse a comma-separated id filter (`?source=1,2,3`) into raw ids.
///
/// # Errors
///
/// Returns a 400 when any element is not an integer.
pub(crate) fn parse_id_list(field: &str, raw: &str) -> Result<Vec<i64>, AppError> {
    raw.split(',')
        .map(str::trim)
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| AppError::bad_request(format!("{field} must be a list of ids")))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_ids() {
        assert_eq!(parse_id_list("source", "1,2, 3").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(parse_id_list("source", "1,x").is_err());
    }
}
