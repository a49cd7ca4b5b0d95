use std::sync::Arc;

use signup_audit_api::UserRecord;

use crate::store::{RecordStore, StoreError, Table};

#[derive(Debug, Clone)]
pub struct UserRepository {
    store: Arc<RecordStore>,
}

impl UserRepository {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        self.store.load_all(Table::Users)
    }

    /// First user whose email or username equals `identifier`
    pub fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|user| user.matches_identifier(identifier)))
    }

    /// First user already holding this email or this username
    pub fn find_conflict(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|user| user.email == email || user.username == username))
    }

    pub fn create(&self, user: &UserRecord) -> Result<(), StoreError> {
        self.store.append(Table::Users, user)
    }
}
