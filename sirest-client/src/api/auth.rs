//! Login, signup and logout

use super::endpoints;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::Session;
use crate::SirestClient;
use shared::client::{LoginRequest, LoginResponse, SignupRequest};
use shared::response::Envelope;
use shared::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text, validate_password,
    validate_required_text,
};

impl<C: HttpClient> SirestClient<C> {
    /// Log in with email and password. Sent with the anonymous token.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        validate_email(email)?;
        validate_required_text(password, "password", usize::MAX)?;

        let req = LoginRequest {
            email: email.trim().to_lowercase(),
            password: password.to_string(),
        };
        let env: Envelope = self.http().post(endpoints::LOGIN, &req, None).await?;
        let resp: LoginResponse = env.into_payload()?;
        tracing::info!(user_id = %resp.user.id, role = %resp.user.role, "Logged in");
        Ok(Session::from(resp))
    }

    /// Register a customer account and log it in
    pub async fn signup(&self, req: &SignupRequest) -> ClientResult<Session> {
        validate_email(&req.email)?;
        validate_password(&req.password)?;
        validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;

        let env: Envelope = self.http().post(endpoints::SIGNUP, req, None).await?;
        let resp: LoginResponse = env.into_payload()?;
        tracing::info!(user_id = %resp.user.id, "Signed up");
        Ok(Session::from(resp))
    }

    /// Invalidate the token server-side; consumes the session
    pub async fn logout(&self, session: Session) -> ClientResult<()> {
        self.post_unit(endpoints::LOGOUT, &serde_json::json!({}), Some(&session))
            .await?;
        tracing::info!(user_id = %session.user_id(), "Logged out");
        Ok(())
    }
}
