use std::sync::Arc;

use axum::extract::State;
use signup_audit_api::{AuditResponse, UsersResponse};

use crate::auth::services::AuthService;
use crate::response::{AppResponse, AppResult};

/// GET /api/users
pub async fn list_users(State(service): State<Arc<AuthService>>) -> AppResult<UsersResponse> {
    let users = service.list_users()?;
    Ok(AppResponse::ok(UsersResponse::from(users)))
}

/// GET /api/audit
pub async fn list_audit(State(service): State<Arc<AuthService>>) -> AppResult<AuditResponse> {
    let audits = service.list_audit()?;
    Ok(AppResponse::ok(AuditResponse::from(audits)))
}
