use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{admin, auth, bookings, health_check, movies, reviews, showtimes};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let cors = create_cors_layer(&state.config.cors_allowed_origins);
    let hsts = state.config.hsts;

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer(hsts))
        .layer(cors)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/movies", get(movies::list_movies).post(movies::create_movie))
        .route(
            "/movies/:id",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route("/movies/:id/showtimes", get(movies::list_movie_showtimes))
        .route("/screens", get(showtimes::list_screens))
        .route("/showtimes", post(showtimes::create_showtimes))
        .route("/showtimes/:id/seats", get(showtimes::booked_seats))
        .route(
            "/bookings",
            get(bookings::list_my_bookings).post(bookings::create_booking),
        )
        .route("/bookings/:id/cancel", put(bookings::cancel_booking))
        .route("/reviews", post(reviews::create_review))
        .route("/reviews/:movie_id", get(reviews::list_reviews))
        .route("/admin/stats", get(admin::dashboard_stats))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/:id", delete(admin::delete_user))
}
