use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::seat::SeatMap;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Screen {
    pub id: Uuid,
    pub name: String,
    pub total_seats: i32,
    pub seats_per_row: i32,
}

impl Screen {
    pub fn seat_map(&self) -> SeatMap {
        SeatMap::new(self.total_seats, self.seats_per_row)
    }
}
