//! Postgres queries, one module per table. Functions are generic over
//! [`sqlx::PgExecutor`] so callers can run them on the pool or inside an open
//! transaction.

pub mod bookings;
pub mod movies;
pub mod reviews;
pub mod screens;
pub mod showtimes;
pub mod stats;
pub mod users;
