use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rows are labeled `A` through `Z`.
pub const MAX_ROWS: u32 = 26;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a valid seat label")]
pub struct InvalidSeatLabel(pub String);

/// A seat label such as `C7`: row letter followed by a 1-based seat number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeatLabel {
    row: u32,
    number: u32,
}

impl SeatLabel {
    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn number(&self) -> u32 {
        self.number
    }
}

impl FromStr for SeatLabel {
    type Err = InvalidSeatLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidSeatLabel(s.to_string());

        let mut chars = s.chars();
        let row = chars
            .next()
            .filter(|c| c.is_ascii_uppercase())
            .ok_or_else(invalid)?;

        let digits = chars.as_str();
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let number = digits.parse::<u32>().map_err(|_| invalid())?;

        Ok(SeatLabel {
            row: u32::from(row as u8 - b'A'),
            number,
        })
    }
}

impl fmt::Display for SeatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(b'A' + self.row as u8), self.number)
    }
}

/// Bounds of a screen's seat grid. The last row may be partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatMap {
    total_seats: u32,
    seats_per_row: u32,
}

impl SeatMap {
    pub fn new(total_seats: i32, seats_per_row: i32) -> Self {
        Self {
            total_seats: u32::try_from(total_seats).unwrap_or(0),
            seats_per_row: u32::try_from(seats_per_row).unwrap_or(0),
        }
    }

    pub fn rows(&self) -> u32 {
        if self.seats_per_row == 0 {
            return 0;
        }
        self.total_seats.div_ceil(self.seats_per_row).min(MAX_ROWS)
    }

    pub fn contains(&self, seat: &SeatLabel) -> bool {
        if seat.number == 0 || seat.number > self.seats_per_row || seat.row >= self.rows() {
            return false;
        }
        let index = u64::from(seat.row) * u64::from(self.seats_per_row) + u64::from(seat.number - 1);
        index < u64::from(self.total_seats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(s: &str) -> SeatLabel {
        s.parse().unwrap()
    }

    #[test]
    fn parses_row_and_number() {
        let label = seat("J10");
        assert_eq!(label.row(), 9);
        assert_eq!(label.number(), 10);
        assert_eq!(label.to_string(), "J10");
    }

    #[test]
    fn rejects_malformed_labels() {
        for bad in ["", "A", "1A", "a1", "A0", "A01", "AA1", "A-1", "A1 ", "A99999999999"] {
            assert!(bad.parse::<SeatLabel>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn full_grid_bounds() {
        let map = SeatMap::new(100, 10);
        assert_eq!(map.rows(), 10);
        assert!(map.contains(&seat("A1")));
        assert!(map.contains(&seat("J10")));
        assert!(!map.contains(&seat("A11")));
        assert!(!map.contains(&seat("K1")));
    }

    #[test]
    fn partial_last_row() {
        let map = SeatMap::new(25, 10);
        assert_eq!(map.rows(), 3);
        assert!(map.contains(&seat("C5")));
        assert!(!map.contains(&seat("C6")));
    }

    #[test]
    fn degenerate_map_contains_nothing() {
        let map = SeatMap::new(10, 0);
        assert_eq!(map.rows(), 0);
        assert!(!map.contains(&seat("A1")));
    }
}
