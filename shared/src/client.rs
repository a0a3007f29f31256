//! Auth request/response types shared by the client and test backends

use crate::models::UserProfile;
use serde::{Deserialize, Serialize};

/// Login request (`POST /auth/login`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    #[serde(alias = "access_token")]
    pub token: String,
    pub user: UserProfile,
}

/// Customer self-registration (`POST /auth/signup`)
///
/// Staff accounts are created by an administrator; signup always yields a
/// `cliente` account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
