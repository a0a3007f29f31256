use super::endpoints;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::Session;
use crate::SirestClient;
use shared::models::{Payment, PaymentCreate};

impl<C: HttpClient> SirestClient<C> {
    pub async fn list_payments(&self, session: &Session) -> ClientResult<Vec<Payment>> {
        self.fetch_or_default(endpoints::PAYMENTS, "payments", Some(session))
            .await
    }

    /// Raw create. Prefer [`PaymentService::settle`](crate::PaymentService::settle).
    pub async fn create_payment(
        &self,
        session: &Session,
        payment: &PaymentCreate,
    ) -> ClientResult<Payment> {
        self.post_for(endpoints::PAYMENTS, "payment", payment, Some(session))
            .await
    }
}
