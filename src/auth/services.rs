// src/auth/services.rs

use std::sync::Arc;

use signup_audit_api::{
    LoginRequest, LoginResponse, LoginUser, SignupRequest, SignupResponse, UserRecord,
};

use super::extractors::ClientInfo;
use super::validation;
use crate::error::AppError;
use crate::store::RecordStore;
use crate::store::ids;
use crate::store::repositories::{AuditRepository, UserRepository};

/// Identifier recorded when a login arrives without identifier or password.
pub const EMPTY_ATTEMPT: &str = "empty_attempt";

pub struct AuthService {
    users: UserRepository,
    audit: AuditRepository,
}

impl AuthService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            users: UserRepository::new(Arc::clone(&store)),
            audit: AuditRepository::new(store),
        }
    }

    /// Inscription d'un nouvel utilisateur
    pub fn signup(
        &self,
        request: &SignupRequest,
        client: &ClientInfo,
    ) -> Result<SignupResponse, AppError> {
        let signup = validation::validate_signup(request).inspect_err(|e| {
            tracing::warn!(reason = %e, client = %client.address, "signup rejected");
        })?;

        if let Some(existing) = self.users.find_conflict(&signup.email, &signup.username)? {
            tracing::warn!(
                username = %signup.username,
                existing_id = %existing.id,
                "signup conflicts with existing user"
            );
            return Err(AppError::conflict("Email/username exists."));
        }

        let user = UserRecord {
            id: ids::user_id(),
            email: signup.email,
            full_name: signup.full_name,
            username: signup.username,
            password: signup.password,
            birthday: signup.birthday,
        };

        // Two separate appends: a failure in between leaves the audit behind.
        self.users.create(&user)?;
        self.audit.record_signup(&user)?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            client = %client.address,
            user_agent = client.user_agent.as_deref().unwrap_or("-"),
            "user signed up"
        );
        Ok(SignupResponse {
            success: true,
            message: "Account created! Log in now.".to_string(),
        })
    }

    /// Connexion d'un utilisateur
    ///
    /// Every failure is written to the audit table before the error is
    /// returned.
    pub fn login(
        &self,
        request: &LoginRequest,
        client: &ClientInfo,
    ) -> Result<LoginResponse, AppError> {
        let password = request.password.as_deref().unwrap_or_default();
        let identifier = match request.identifier.as_deref() {
            Some(identifier) if !identifier.is_empty() && !password.is_empty() => identifier,
            _ => {
                self.log_failed_attempt(EMPTY_ATTEMPT, password, client);
                return Err(AppError::validation("Fields required."));
            }
        };

        let Some(user) = self.users.find_by_identifier(identifier)? else {
            self.log_failed_attempt(identifier, password, client);
            return Err(AppError::unknown_identifier());
        };

        if user.password != password {
            self.log_failed_attempt(identifier, password, client);
            return Err(AppError::wrong_password());
        }

        let snapshot = self.audit.record_login(&user)?;
        tracing::info!(
            user_id = %user.id,
            audit_id = %snapshot.id,
            username = %user.username,
            client = %client.address,
            user_agent = client.user_agent.as_deref().unwrap_or("-"),
            "user logged in"
        );

        Ok(LoginResponse {
            success: true,
            message: format!("Welcome, {}!", user.full_name),
            user: LoginUser::from(&user),
        })
    }

    pub fn list_users(&self) -> Result<Vec<UserRecord>, AppError> {
        self.users.list().map_err(|e| AppError::load(&e))
    }

    pub fn list_audit(&self) -> Result<Vec<UserRecord>, AppError> {
        self.audit.list().map_err(|e| AppError::load(&e))
    }

    /// Best effort: a store failure here is logged, never returned.
    fn log_failed_attempt(&self, identifier: &str, attempted_password: &str, client: &ClientInfo) {
        match self.audit.record_failed_login(identifier, attempted_password) {
            Ok(record) => tracing::warn!(
                audit_id = %record.id,
                identifier,
                client = %client.address,
                "failed login recorded"
            ),
            Err(e) => tracing::error!(
                error = %e,
                identifier,
                "could not record failed login"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::{Datelike, Local};
    use signup_audit_api::FAILED_LOGIN_NAME;
    use tempfile::TempDir;

    fn service() -> (TempDir, AuthService) {
        let dir = TempDir::new().expect("temp dir");
        let store = Arc::new(RecordStore::in_dir(dir.path()));
        (dir, AuthService::new(store))
    }

    fn signup_request(email: &str, username: &str) -> SignupRequest {
        SignupRequest {
            email: Some(email.to_string()),
            full_name: Some("Ada Lovelace".to_string()),
            username: Some(username.to_string()),
            password: Some("secret1".to_string()),
            birthday: Some("1990-12-10".to_string()),
        }
    }

    fn login_request(identifier: &str, password: &str) -> LoginRequest {
        LoginRequest {
            identifier: Some(identifier.to_string()),
            password: Some(password.to_string()),
        }
    }

    fn client() -> ClientInfo {
        ClientInfo::unknown()
    }

    #[test]
    fn signup_persists_user_and_identical_audit_row() {
        let (_dir, service) = service();
        let response = service
            .signup(&signup_request("ada@example.com", "ada"), &client())
            .expect("signup should succeed");
        assert!(response.success);
        assert_eq!(response.message, "Account created! Log in now.");

        let users = service.list_users().unwrap();
        assert_eq!(users.len(), 1);
        let user = &users[0];
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.full_name, "Ada Lovelace");
        assert_eq!(user.username, "ada");
        assert_eq!(user.password, "secret1");
        assert_eq!(user.birthday, "1990-12-10");

        assert_eq!(service.list_audit().unwrap(), users);
    }

    #[test]
    fn signup_with_taken_username_conflicts_and_appends_nothing() {
        let (_dir, service) = service();
        service
            .signup(&signup_request("ada@example.com", "ada"), &client())
            .unwrap();

        let err = service
            .signup(&signup_request("other@example.com", "ada"), &client())
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), "Email/username exists.");
        assert_eq!(service.list_users().unwrap().len(), 1);
        assert_eq!(service.list_audit().unwrap().len(), 1);
    }

    #[test]
    fn signup_with_taken_email_conflicts() {
        let (_dir, service) = service();
        service
            .signup(&signup_request("ada@example.com", "ada"), &client())
            .unwrap();

        let err = service
            .signup(&signup_request("ada@example.com", "someone"), &client())
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn signup_rejects_underage_user() {
        let (_dir, service) = service();
        let five_years_ago = format!("{}-01-01", Local::now().year() - 5);
        let request = SignupRequest {
            birthday: Some(five_years_ago),
            ..signup_request("kid@example.com", "kid")
        };

        let err = service.signup(&request, &client()).unwrap_err();
        assert_eq!(err.to_string(), "Must be 13+.");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(service.list_users().unwrap().is_empty());
    }

    #[test]
    fn signup_validation_failure_writes_nothing() {
        let (_dir, service) = service();
        let request = SignupRequest {
            email: Some("not-an-email".to_string()),
            ..signup_request("", "ada")
        };

        let err = service.signup(&request, &client()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid email.");
        assert!(service.list_audit().unwrap().is_empty());
    }

    #[test]
    fn login_with_username_or_email_succeeds_and_snapshots_user() {
        let (_dir, service) = service();
        service
            .signup(&signup_request("ada@example.com", "ada"), &client())
            .unwrap();
        let user = service.list_users().unwrap().remove(0);

        let response = service
            .login(&login_request("ada", "secret1"), &client())
            .expect("login by username");
        assert_eq!(response.message, "Welcome, Ada Lovelace!");
        assert_eq!(response.user.id, user.id);
        assert_eq!(response.user.username, "ada");

        service
            .login(&login_request("ada@example.com", "secret1"), &client())
            .expect("login by email");

        let audit = service.list_audit().unwrap();
        assert_eq!(audit.len(), 3);
        for snapshot in &audit[1..] {
            assert!(snapshot.id.starts_with("login_"));
            assert_eq!(snapshot.password, "secret1");
            assert_eq!(
                UserRecord {
                    id: user.id.clone(),
                    ..snapshot.clone()
                },
                user
            );
        }
    }

    #[test]
    fn wrong_password_records_attempted_password() {
        let (_dir, service) = service();
        service
            .signup(&signup_request("ada@example.com", "ada"), &client())
            .unwrap();
        let before = service.list_audit().unwrap().len();

        let err = service
            .login(&login_request("ada", "guess-123"), &client())
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials(_)));
        assert_eq!(err.to_string(), "Invalid password.");

        let audit = service.list_audit().unwrap();
        assert_eq!(audit.len(), before + 1);
        let failed = audit.last().unwrap();
        assert!(failed.id.starts_with("failed_"));
        assert_eq!(failed.full_name, FAILED_LOGIN_NAME);
        assert_eq!(failed.username, "ada");
        assert_eq!(failed.password, "guess-123");
    }

    #[test]
    fn unknown_identifier_is_audited_like_a_wrong_password() {
        let (_dir, service) = service();

        let err = service
            .login(&login_request("ghost", "whatever"), &client())
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid email/username.");

        let audit = service.list_audit().unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].email, "ghost");
        assert_eq!(audit[0].password, "whatever");
        assert!(audit[0].is_failed_login());
    }

    #[test]
    fn missing_fields_are_audited_as_empty_attempt() {
        let (_dir, service) = service();
        let request = LoginRequest {
            identifier: Some("ada".to_string()),
            password: None,
        };

        let err = service.login(&request, &client()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "Fields required.");

        let audit = service.list_audit().unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].username, EMPTY_ATTEMPT);
        assert_eq!(audit[0].password, "");
    }

    #[test]
    fn failed_attempt_logging_errors_are_swallowed() {
        let dir = TempDir::new().expect("temp dir");
        // audit path points at a directory, so every audit append fails
        let store = Arc::new(RecordStore::new(
            dir.path().join("users.csv"),
            dir.path().to_path_buf(),
        ));
        let service = AuthService::new(store);

        let err = service
            .login(&login_request("ghost", "whatever"), &client())
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid email/username.");
    }

    fn service_with_broken_audit() -> (TempDir, AuthService) {
        let dir = TempDir::new().expect("temp dir");
        let store = Arc::new(RecordStore::new(
            dir.path().join("users.csv"),
            dir.path().to_path_buf(),
        ));
        (dir, AuthService::new(store))
    }

    #[test]
    fn signup_audit_failure_is_a_500_and_keeps_the_user_row() {
        let (_dir, service) = service_with_broken_audit();

        let err = service
            .signup(&signup_request("ada@example.com", "ada"), &client())
            .unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
        assert!(err.to_string().starts_with("Server error:"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let users = service.list_users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "ada");
    }

    #[test]
    fn login_snapshot_failure_is_a_500() {
        let (_dir, service) = service_with_broken_audit();
        // the user row lands even though the signup itself reports a failure
        assert!(
            service
                .signup(&signup_request("ada@example.com", "ada"), &client())
                .is_err()
        );

        let err = service
            .login(&login_request("ada", "secret1"), &client())
            .unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
        assert!(err.to_string().starts_with("Server error:"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
