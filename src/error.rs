// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use signup_audit_api::ErrorResponse;

use crate::auth::validation::ValidationError;
use crate::store::StoreError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    // === Client errors (400) ===
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidCredentials(String),

    // === Store errors (500) ===
    #[error("Server error: {0}")]
    Store(String),
    #[error("Load error: {0}")]
    Load(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.get_error_info();

        if status.is_server_error() {
            tracing::error!(error_code, %status, detail = %self, "request failed");
        }

        let body = Json(ErrorResponse::new(self.to_string()));
        (status, body).into_response()
    }
}

impl AppError {
    fn get_error_info(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Conflict(_) => (StatusCode::BAD_REQUEST, "CONFLICT"),
            AppError::InvalidCredentials(_) => (StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS"),
            AppError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
            AppError::Load(_) => (StatusCode::INTERNAL_SERVER_ERROR, "LOAD_ERROR"),
        }
    }

    // === Constructeurs helpers ===
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    /// No user has this email or username
    pub fn unknown_identifier() -> Self {
        AppError::InvalidCredentials("Invalid email/username.".to_string())
    }

    pub fn wrong_password() -> Self {
        AppError::InvalidCredentials("Invalid password.".to_string())
    }

    /// Store failure while reading a table for a listing
    pub fn load(err: &StoreError) -> Self {
        AppError::Load(err.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        self.get_error_info().0
    }

    /// Inline HTML variant used by the view routes.
    pub fn into_html(self) -> Response {
        let body = format!(
            "<h2>Error: {}</h2>",
            html_escape::encode_text(&self.to_string())
        );
        if self.status_code().is_server_error() {
            tracing::error!(detail = %self, "view failed");
        }
        (self.status_code(), Html(body)).into_response()
    }
}

// === Conversions automatiques ===

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err.to_string())
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::validation(format!("Invalid JSON: {}", err.body_text()))
    }
}

impl From<axum::extract::rejection::FormRejection> for AppError {
    fn from(err: axum::extract::rejection::FormRejection) -> Self {
        AppError::validation(format!("Invalid form: {}", err.body_text()))
    }
}
