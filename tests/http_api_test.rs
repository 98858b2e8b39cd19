//! Request validation and access control at the HTTP layer. None of these
//! requests reach the database.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use cinema_server::models::UserRole;

use common::{offline_app, send, token_for};

#[tokio::test]
async fn health_check_reports_ok() {
    let app = offline_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = offline_app();
    let response = app
        .oneshot(
            axum::http::Request::builder()
                .uri("/health")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["cache-control"], "no-store");
}

#[tokio::test]
async fn booking_requires_authentication() {
    let app = offline_app();
    let body = json!({ "showtime_id": Uuid::new_v4(), "seats": ["A1"], "total_amount": 12.5 });

    let (status, body) = send(&app, Method::POST, "/api/bookings", None, Some(body)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH_ERROR");
}

#[tokio::test]
async fn booking_rejects_forged_token() {
    let app = offline_app();
    let body = json!({ "showtime_id": Uuid::new_v4(), "seats": ["A1"], "total_amount": 12.5 });

    let (status, _) = send(&app, Method::POST, "/api/bookings", Some("not.a.jwt"), Some(body)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn booking_rejects_empty_seat_selection() {
    let app = offline_app();
    let token = token_for(Uuid::new_v4(), UserRole::User);
    let body = json!({ "showtime_id": Uuid::new_v4(), "seats": [], "total_amount": 0 });

    let (status, body) = send(&app, Method::POST, "/api/bookings", Some(&token), Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn booking_rejects_duplicate_seats() {
    let app = offline_app();
    let token = token_for(Uuid::new_v4(), UserRole::User);
    let body = json!({ "showtime_id": Uuid::new_v4(), "seats": ["A1", "A1"], "total_amount": 25 });

    let (status, body) = send(&app, Method::POST, "/api/bookings", Some(&token), Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].as_str().unwrap().contains("A1"));
}

#[tokio::test]
async fn booking_rejects_missing_fields() {
    let app = offline_app();
    let token = token_for(Uuid::new_v4(), UserRole::User);
    let body = json!({ "showtime_id": Uuid::new_v4(), "seats": ["A1"] });

    let (status, body) = send(&app, Method::POST, "/api/bookings", Some(&token), Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].as_str().unwrap().contains("total_amount"));
}

#[tokio::test]
async fn cancel_requires_authentication() {
    let app = offline_app();
    let uri = format!("/api/bookings/{}/cancel", Uuid::new_v4());

    let (status, _) = send(&app, Method::PUT, &uri, None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn showtime_generation_is_admin_only() {
    let app = offline_app();
    let token = token_for(Uuid::new_v4(), UserRole::User);
    let body = json!({
        "movie_id": Uuid::new_v4(),
        "screen_id": Uuid::new_v4(),
        "start_date": "2030-01-01",
        "end_date": "2030-01-07",
        "show_time": "19:30",
        "price": 12.5
    });

    let (status, body) = send(&app, Method::POST, "/api/showtimes", Some(&token), Some(body)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn showtime_generation_validates_before_scheduling() {
    let app = offline_app();
    let token = token_for(Uuid::new_v4(), UserRole::SuperAdmin);
    let body = json!({
        "movie_id": Uuid::new_v4(),
        "screen_id": Uuid::new_v4(),
        "start_date": "2030-01-01",
        "end_date": "2030-01-07",
        "price": 12.5
    });

    let (status, body) = send(&app, Method::POST, "/api/showtimes", Some(&token), Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].as_str().unwrap().contains("show_time"));
}

#[tokio::test]
async fn admin_routes_reject_regular_users() {
    let app = offline_app();
    let token = token_for(Uuid::new_v4(), UserRole::User);

    for uri in ["/api/admin/stats", "/api/admin/users"] {
        let (status, _) = send(&app, Method::GET, uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
    }
}

#[tokio::test]
async fn register_rejects_invalid_email() {
    let app = offline_app();
    let body = json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "not-an-email",
        "password": "correct-horse"
    });

    let (status, body) = send(&app, Method::POST, "/api/auth/register", None, Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn review_rating_out_of_range() {
    let app = offline_app();
    let token = token_for(Uuid::new_v4(), UserRole::User);
    let body = json!({ "movie_id": Uuid::new_v4(), "rating": 9 });

    let (status, _) = send(&app, Method::POST, "/api/reviews", Some(&token), Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_showtime_id_gets_json_error() {
    let app = offline_app();

    let (status, body) = send(&app, Method::GET, "/api/showtimes/xyz/seats", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["msg"].is_string());
}

#[tokio::test]
async fn malformed_ids_on_other_routes_get_json_errors() {
    let app = offline_app();
    let admin = token_for(Uuid::new_v4(), UserRole::Admin);

    let (status, body) = send(&app, Method::GET, "/api/movies/42", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::DELETE, "/api/admin/users/me", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn cancelling_a_malformed_booking_id_is_not_found() {
    let app = offline_app();
    let token = token_for(Uuid::new_v4(), UserRole::User);

    let (status, body) =
        send(&app, Method::PUT, "/api/bookings/not-a-uuid/cancel", Some(&token), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body["details"].is_null());
}
