use super::endpoints;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::Session;
use crate::SirestClient;
use shared::models::{DiningTable, DiningTableUpdate};

impl<C: HttpClient> SirestClient<C> {
    pub async fn list_tables(&self, session: &Session) -> ClientResult<Vec<DiningTable>> {
        self.fetch_or_default(endpoints::TABLES, "tables", Some(session))
            .await
    }

    pub async fn update_table(
        &self,
        session: &Session,
        table_id: &str,
        update: &DiningTableUpdate,
    ) -> ClientResult<DiningTable> {
        let endpoint = endpoints::item(endpoints::TABLES, table_id);
        self.put_for(&endpoint, "table", update, Some(session)).await
    }
}
