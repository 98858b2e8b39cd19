//! Booking and scheduling rules on top of the persistence layer.

pub mod availability;
pub mod booking;
pub mod cancellation;
pub mod reference;
pub mod showtime_generator;
