use super::endpoints;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::Session;
use crate::SirestClient;
use shared::models::StaffStatus;

impl<C: HttpClient> SirestClient<C> {
    pub async fn staff_status(&self, session: &Session) -> ClientResult<Vec<StaffStatus>> {
        self.fetch_or_default(endpoints::STAFF_STATUS, "staff", Some(session))
            .await
    }
}
