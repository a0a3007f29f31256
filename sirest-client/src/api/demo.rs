use super::endpoints;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::SirestClient;
use shared::demo::DemoSeedResult;
use shared::response::Envelope;

impl<C: HttpClient> SirestClient<C> {
    /// Seed demo accounts, menu and tables. Safe to call repeatedly.
    pub async fn init_demo_data(&self) -> ClientResult<DemoSeedResult> {
        let env: Envelope = self
            .http()
            .post(endpoints::INIT_DEMO_DATA, &serde_json::json!({}), None)
            .await?;
        let result: DemoSeedResult = env.into_payload()?;
        tracing::info!(
            users = result.users_created,
            products = result.products_created,
            tables = result.tables_created,
            "Demo data initialised"
        );
        Ok(result)
    }
}
