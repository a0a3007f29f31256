use super::endpoints;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::Session;
use crate::SirestClient;
use shared::models::{CashClosing, Role};

impl<C: HttpClient> SirestClient<C> {
    /// Store an end-of-shift closing computed on this side
    pub async fn post_cash_closing(
        &self,
        session: &Session,
        closing: &CashClosing,
    ) -> ClientResult<CashClosing> {
        session.require_role(&[Role::Cashier, Role::Admin])?;
        let saved: CashClosing = self
            .post_for(endpoints::CASH_CLOSING, "cash_closing", closing, Some(session))
            .await?;
        tracing::info!(
            business_date = %saved.business_date,
            total_sales = saved.total_sales,
            difference = saved.difference,
            "Cash closing stored"
        );
        Ok(saved)
    }
}
