use serde::{Deserialize, Serialize};

// -------- REQUEST DTOs --------
// Every field is optional so a missing value is reported as a validation
// error instead of a body rejection.

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>, // Plain text
    pub birthday: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct LoginRequest {
    /// Email or username
    pub identifier: Option<String>,
    pub password: Option<String>, // Plain text
}
