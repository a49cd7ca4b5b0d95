use serde::{Deserialize, Serialize};

use crate::record::UserRecord;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
}

/// Public part of the user returned after login (no password)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: String,
    pub username: String,
    pub full_name: String,
}

impl From<&UserRecord> for LoginUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            username: record.username.clone(),
            full_name: record.full_name.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: LoginUser,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<UserRecord>,
    pub count: usize,
}

impl From<Vec<UserRecord>> for UsersResponse {
    fn from(users: Vec<UserRecord>) -> Self {
        Self {
            success: true,
            count: users.len(),
            users,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuditResponse {
    pub success: bool,
    pub audits: Vec<UserRecord>,
    pub count: usize,
}

impl From<Vec<UserRecord>> for AuditResponse {
    fn from(audits: Vec<UserRecord>) -> Self {
        Self {
            success: true,
            count: audits.len(),
            audits,
        }
    }
}
