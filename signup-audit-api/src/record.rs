use serde::{Deserialize, Serialize};

/// `fullName` written on audit rows that record a failed login.
pub const FAILED_LOGIN_NAME: &str = "Failed Login Attempt";

/// One row of either the `users` or the `audit` table.
///
/// Both tables share this schema. On audit rows for failed logins,
/// `email` and `username` hold the submitted identifier and `birthday`
/// holds the event timestamp.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub username: String,
    pub password: String,
    pub birthday: String,
}

impl UserRecord {
    pub fn is_failed_login(&self) -> bool {
        self.full_name == FAILED_LOGIN_NAME
    }

    /// True when the identifier matches this record's email or username.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.email == identifier || self.username == identifier
    }
}
