use super::endpoints;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::Session;
use crate::SirestClient;
use shared::order::{Order, OrderCreate, OrderNoteUpdate, OrderStatusUpdate};

impl<C: HttpClient> SirestClient<C> {
    pub async fn list_orders(&self, session: &Session) -> ClientResult<Vec<Order>> {
        self.fetch_or_default(endpoints::ORDERS, "orders", Some(session))
            .await
    }

    /// Raw create. Prefer [`OrderService::create`](crate::OrderService::create),
    /// which validates the draft first.
    pub async fn create_order(&self, session: &Session, order: &OrderCreate) -> ClientResult<Order> {
        self.post_for(endpoints::ORDERS, "order", order, Some(session))
            .await
    }

    /// Raw status update. Prefer
    /// [`OrderService::transition`](crate::OrderService::transition).
    pub async fn update_order_status(
        &self,
        session: &Session,
        order_id: &str,
        update: &OrderStatusUpdate,
    ) -> ClientResult<Order> {
        let endpoint = endpoints::item(endpoints::ORDERS, order_id);
        self.put_for(&endpoint, "order", update, Some(session)).await
    }

    pub async fn update_order_note(
        &self,
        session: &Session,
        order_id: &str,
        update: &OrderNoteUpdate,
    ) -> ClientResult<Order> {
        let endpoint = endpoints::item(endpoints::ORDERS, order_id);
        self.put_for(&endpoint, "order", update, Some(session)).await
    }
}
