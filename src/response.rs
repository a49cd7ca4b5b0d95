use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON success response returned by the API handlers.
///
/// ```rust,ignore
/// AppResponse::ok(listing)
/// ```
pub struct AppResponse<T> {
    status: StatusCode,
    body: T,
}

impl<T> AppResponse<T>
where
    T: Serialize,
{
    pub fn new(status: StatusCode, body: T) -> Self {
        Self { status, body }
    }

    /// 200 OK
    pub fn ok(body: T) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

impl<T> IntoResponse for AppResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Handler result: `AppResponse` on success, `AppError` otherwise
pub type AppResult<T> = Result<AppResponse<T>, crate::error::AppError>;
