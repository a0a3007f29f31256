use super::endpoints;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::Session;
use crate::SirestClient;
use shared::models::{ProfileUpdate, UserProfile};
use shared::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text};

impl<C: HttpClient> SirestClient<C> {
    pub async fn get_profile(&self, session: &Session) -> ClientResult<UserProfile> {
        self.fetch(endpoints::PROFILE, "profile", Some(session)).await
    }

    pub async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> ClientResult<UserProfile> {
        if let Some(name) = &update.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        validate_optional_text(&update.phone, "phone", MAX_SHORT_TEXT_LEN)?;
        self.put_for(endpoints::PROFILE, "profile", update, Some(session))
            .await
    }
}
