use super::endpoints;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::Session;
use crate::SirestClient;
use shared::error::AppError;
use shared::models::InvoiceEmailRequest;
use shared::validation::validate_email;

impl<C: HttpClient> SirestClient<C> {
    pub async fn send_invoice_email(
        &self,
        session: &Session,
        req: &InvoiceEmailRequest,
    ) -> ClientResult<()> {
        validate_email(&req.email)?;
        if req.document.trim().is_empty() {
            return Err(AppError::required("document").into());
        }
        self.post_unit(endpoints::SEND_INVOICE_EMAIL, req, Some(session))
            .await?;
        tracing::info!(order_id = %req.order_id, "Invoice e-mailed");
        Ok(())
    }
}
