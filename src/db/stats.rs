use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub users: i64,
    pub movies: i64,
    pub bookings: i64,
    pub revenue: Decimal,
    pub movie_stats: Vec<MovieStats>,
    pub daily_stats: Vec<DailyStats>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct MovieStats {
    pub id: Uuid,
    pub title: String,
    pub total_bookings: i64,
    pub total_revenue: Decimal,
}

#[derive(Debug, Serialize, FromRow)]
pub struct DailyStats {
    pub date: String,
    pub total_bookings: i64,
    pub total_revenue: Decimal,
}

/// Simple rollups over confirmed bookings; the daily series covers the last
/// 30 show dates that have any.
pub async fn dashboard(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    let movies: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
        .fetch_one(pool)
        .await?;
    let bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
        .fetch_one(pool)
        .await?;
    let revenue: Decimal = sqlx::query_scalar(
        "SELECT COALESCE(SUM(total_amount), 0) FROM bookings WHERE booking_status = 'confirmed'",
    )
    .fetch_one(pool)
    .await?;

    let movie_stats = sqlx::query_as(
        "SELECT m.id, m.title, \
                COUNT(b.id) AS total_bookings, \
                COALESCE(SUM(b.total_amount), 0) AS total_revenue \
         FROM movies m \
         LEFT JOIN showtimes s ON m.id = s.movie_id \
         LEFT JOIN bookings b ON s.id = b.showtime_id AND b.booking_status = 'confirmed' \
         GROUP BY m.id, m.title \
         ORDER BY total_revenue DESC",
    )
    .fetch_all(pool)
    .await?;

    let daily_stats = sqlx::query_as(
        "SELECT TO_CHAR(s.show_date, 'YYYY-MM-DD') AS date, \
                COUNT(b.id) AS total_bookings, \
                COALESCE(SUM(b.total_amount), 0) AS total_revenue \
         FROM showtimes s \
         JOIN bookings b ON s.id = b.showtime_id \
         WHERE b.booking_status = 'confirmed' \
         GROUP BY s.show_date \
         ORDER BY s.show_date DESC \
         LIMIT 30",
    )
    .fetch_all(pool)
    .await?;

    Ok(DashboardStats {
        users,
        movies,
        bookings,
        revenue,
        movie_stats,
        daily_stats,
    })
}
