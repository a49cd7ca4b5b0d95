use std::sync::Arc;

use chrono::Utc;
use signup_audit_api::{FAILED_LOGIN_NAME, UserRecord};

use crate::store::{RecordStore, StoreError, Table, ids};

/// Write side and listing of the audit trail.
#[derive(Debug, Clone)]
pub struct AuditRepository {
    store: Arc<RecordStore>,
}

impl AuditRepository {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        self.store.load_all(Table::Audit)
    }

    /// Signup: the audit row is identical to the user row, id included.
    pub fn record_signup(&self, user: &UserRecord) -> Result<(), StoreError> {
        self.store.append(Table::Audit, user)
    }

    /// Successful login: full snapshot of the user under a fresh `login_` id.
    pub fn record_login(&self, user: &UserRecord) -> Result<UserRecord, StoreError> {
        let snapshot = UserRecord {
            id: ids::login_id(),
            ..user.clone()
        };
        self.store.append(Table::Audit, &snapshot)?;
        Ok(snapshot)
    }

    /// Failed login. The identifier fills both email and username, and the
    /// birthday column carries the event time.
    pub fn record_failed_login(
        &self,
        identifier: &str,
        attempted_password: &str,
    ) -> Result<UserRecord, StoreError> {
        let record = UserRecord {
            id: ids::failed_login_id(),
            email: identifier.to_string(),
            full_name: FAILED_LOGIN_NAME.to_string(),
            username: identifier.to_string(),
            password: attempted_password.to_string(),
            birthday: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        self.store.append(Table::Audit, &record)?;
        Ok(record)
    }
}
