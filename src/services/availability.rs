use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::db;
use crate::models::SeatLabel;
use crate::utils::error::AppError;

/// Seats held by non-cancelled bookings on a showtime, deduplicated and in
/// seat-map order. An unknown showtime simply has no booked seats.
pub async fn booked_seats<'e, E: PgExecutor<'e>>(
    executor: E,
    showtime_id: Uuid,
) -> Result<Vec<String>, AppError> {
    let held = db::bookings::held_seats(executor, showtime_id).await?;
    let total = held.len();
    let seats = normalize(held);

    if seats.len() != total {
        tracing::warn!(
            showtime_id = %showtime_id,
            duplicates = total - seats.len(),
            "Showtime has seats held by more than one booking"
        );
    }

    Ok(seats)
}

/// Requested seats that are already booked, in seat-map order.
pub fn conflicts(requested: &[String], booked: &[String]) -> Vec<String> {
    let booked: HashSet<&str> = booked.iter().map(String::as_str).collect();
    normalize(
        requested
            .iter()
            .filter(|seat| booked.contains(seat.as_str()))
            .cloned()
            .collect(),
    )
}

fn normalize(seats: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = seats.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
    unique.sort_by(|a, b| compare_labels(a, b));
    unique
}

fn compare_labels(a: &str, b: &str) -> Ordering {
    match (a.parse::<SeatLabel>(), b.parse::<SeatLabel>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(seats: &[&str]) -> Vec<String> {
        seats.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalize_dedups_in_seat_order() {
        let seats = normalize(labels(&["A10", "B1", "A2", "A2", "legacy"]));
        assert_eq!(seats, labels(&["A2", "A10", "B1", "legacy"]));
    }

    #[test]
    fn conflicts_lists_only_overlap() {
        let booked = labels(&["A1", "A2", "C4"]);
        assert_eq!(conflicts(&labels(&["A1", "B1"]), &booked), labels(&["A1"]));
        assert!(conflicts(&labels(&["B1", "B2"]), &booked).is_empty());
    }

    #[test]
    fn conflicts_against_empty_availability() {
        assert!(conflicts(&labels(&["A1"]), &[]).is_empty());
    }
}
