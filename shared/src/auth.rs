//! Auth DTOs shared between the admin core and the backend client

use serde::{Deserialize, Serialize};

/// Authenticated session returned by login and signup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds) when the access token expires
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

/// Backend account information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}
