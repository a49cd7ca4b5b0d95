// src/handlers/auth.rs

use std::sync::Arc;

use axum::extract::State;
use signup_audit_api::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};

use crate::auth::extractors::{ClientInfo, JsonOrForm};
use crate::auth::services::AuthService;
use crate::response::{AppResponse, AppResult};

/// POST /api/signup
pub async fn signup(
    State(service): State<Arc<AuthService>>,
    client: ClientInfo,
    JsonOrForm(payload): JsonOrForm<SignupRequest>,
) -> AppResult<SignupResponse> {
    tracing::debug!(username = ?payload.username, "signup request received");
    let response = service.signup(&payload, &client)?;
    Ok(AppResponse::ok(response))
}

/// POST /api/login
pub async fn login(
    State(service): State<Arc<AuthService>>,
    client: ClientInfo,
    JsonOrForm(payload): JsonOrForm<LoginRequest>,
) -> AppResult<LoginResponse> {
    tracing::debug!(identifier = ?payload.identifier, "login request received");
    let response = service.login(&payload, &client)?;
    Ok(AppResponse::ok(response))
}
