use super::endpoints;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::Session;
use crate::SirestClient;
use shared::models::{Role, UserProfile, UserUpdate};
use shared::validation::{MAX_NAME_LEN, validate_required_text};

impl<C: HttpClient> SirestClient<C> {
    pub async fn list_users(&self, session: &Session) -> ClientResult<Vec<UserProfile>> {
        self.fetch_or_default(endpoints::USERS, "users", Some(session))
            .await
    }

    /// Change another account's name, role or active flag (admin only)
    pub async fn update_user(
        &self,
        session: &Session,
        user_id: &str,
        update: &UserUpdate,
    ) -> ClientResult<UserProfile> {
        session.require_role(&[Role::Admin])?;
        if let Some(name) = &update.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        let endpoint = endpoints::item(endpoints::USERS, user_id);
        let user: UserProfile = self.put_for(&endpoint, "user", update, Some(session)).await?;
        tracing::info!(user_id = %user.id, role = %user.role, active = user.active, "User updated");
        Ok(user)
    }
}
