use super::endpoints;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::Session;
use crate::SirestClient;
use shared::models::StockAlert;

impl<C: HttpClient> SirestClient<C> {
    pub async fn list_alerts(&self, session: &Session) -> ClientResult<Vec<StockAlert>> {
        self.fetch_or_default(endpoints::ALERTS, "alerts", Some(session))
            .await
    }
}
