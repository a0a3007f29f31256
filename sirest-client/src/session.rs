//! Authenticated session
//!
//! A session is created by login and passed explicitly to every call that
//! needs it. There is no ambient "current user".

use chrono::{DateTime, Utc};
use shared::client::LoginResponse;
use shared::error::{AppError, ErrorCode};
use shared::models::{Role, UserProfile};

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Bearer token
    token: String,
    pub user: UserProfile,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
            started_at: Utc::now(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn display_name(&self) -> &str {
        &self.user.name
    }

    /// Fail unless the session's role is one of `allowed`
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), AppError> {
        if allowed.contains(&self.user.role) {
            return Ok(());
        }
        Err(AppError::with_message(
            ErrorCode::RoleRequired,
            format!("{} cannot perform this action", self.user.role.label()),
        )
        .with_detail("role", self.user.role.as_str()))
    }
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Session::new(resp.token, resp.user)
    }
}
