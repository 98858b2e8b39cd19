use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct MessageBody {
    pub msg: String,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    pub msg: String,
    pub code: String,
    pub details: Option<Value>,
}

pub fn success<T>(data: T) -> Response
where
    T: Serialize,
{
    (StatusCode::OK, Json(data)).into_response()
}

pub fn created<T>(data: T) -> Response
where
    T: Serialize,
{
    (StatusCode::CREATED, Json(data)).into_response()
}

pub fn message(msg: impl Into<String>) -> Response {
    let body = MessageBody { msg: msg.into() };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn error(
    code: &str,
    message: impl Into<String>,
    details: Option<Value>,
    status: StatusCode,
) -> Response {
    let body = ApiErrorBody {
        msg: message.into(),
        code: code.to_string(),
        details,
    };

    (status, Json(body)).into_response()
}
