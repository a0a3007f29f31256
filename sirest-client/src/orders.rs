//! Order service
//!
//! Wraps the raw order endpoints with the lifecycle gate and refreshes the
//! registered pollers after every mutation.

use crate::error::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::poller::{RefetchRegistry, Resource};
use crate::session::Session;
use crate::SirestClient;
use shared::error::{AppError, ErrorCode};
use shared::models::Role;
use shared::order::{
    Order, OrderDraft, OrderFilter, OrderNoteUpdate, OrderStatus, OrderStatusUpdate,
    TransitionError, lifecycle,
};
use shared::validation::{MAX_NOTE_LEN, validate_optional_text};

#[derive(Debug)]
pub struct OrderService<C: HttpClient = NetworkHttpClient> {
    client: SirestClient<C>,
    registry: RefetchRegistry,
}

impl<C: HttpClient> Clone for OrderService<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            registry: self.registry.clone(),
        }
    }
}

impl<C: HttpClient> OrderService<C> {
    pub fn new(client: SirestClient<C>, registry: RefetchRegistry) -> Self {
        Self { client, registry }
    }

    pub fn client(&self) -> &SirestClient<C> {
        &self.client
    }

    pub fn registry(&self) -> &RefetchRegistry {
        &self.registry
    }

    /// Place an order from a cart. Waiters and customers only.
    pub async fn create(&self, session: &Session, draft: OrderDraft) -> ClientResult<Order> {
        if !session.role().can_place_orders() {
            return Err(AppError::with_message(
                ErrorCode::RoleRequired,
                format!("{} cannot place orders", session.role().label()),
            )
            .into());
        }
        let create = draft.build(
            session.user_id(),
            Some(session.display_name().to_string()),
        )?;
        let order = self.client.create_order(session, &create).await?;
        tracing::info!(
            order_id = %order.id,
            table = ?order.table_number,
            subtotal = order.subtotal,
            items = order.items.len(),
            "Order created"
        );
        self.after_mutation(&order);
        Ok(order)
    }

    /// Move an order along the lifecycle. `paid` is refused here; it is only
    /// reachable through [`PaymentService::settle`](crate::PaymentService::settle).
    pub async fn transition(
        &self,
        session: &Session,
        order: &Order,
        next: OrderStatus,
    ) -> ClientResult<Order> {
        lifecycle::check(order, next, session.role())?;
        if next == OrderStatus::Paid {
            return Err(AppError::with_message(
                ErrorCode::OrderInvalidTransition,
                format!("order {} is marked paid by settling a payment", order.id),
            )
            .into());
        }
        self.put_status(session, order, next).await
    }

    /// PUT the new status with the version the caller saw
    pub(crate) async fn put_status(
        &self,
        session: &Session,
        order: &Order,
        next: OrderStatus,
    ) -> ClientResult<Order> {
        let update = OrderStatusUpdate {
            status: next,
            expected_version: Some(order.version),
        };
        let updated = self
            .client
            .update_order_status(session, &order.id, &update)
            .await?;
        tracing::info!(
            order_id = %order.id,
            from = %order.status,
            to = %updated.status,
            by = %session.role(),
            "Order status changed"
        );
        self.after_mutation(&updated);
        Ok(updated)
    }

    /// Edit the order note. Customers may only edit their own orders.
    pub async fn update_note(
        &self,
        session: &Session,
        order: &Order,
        note: Option<String>,
    ) -> ClientResult<Order> {
        if order.status.is_terminal() {
            return Err(TransitionError::Terminal {
                order_id: order.id.clone(),
            }
            .into());
        }
        match session.role() {
            Role::Admin | Role::Waiter => {}
            Role::Client if order.created_by == session.user_id() => {}
            role => {
                return Err(AppError::permission_denied(format!(
                    "{} cannot edit order {}",
                    role.label(),
                    order.id
                ))
                .into());
            }
        }
        let note = note.filter(|n| !n.trim().is_empty());
        validate_optional_text(&note, "note", MAX_NOTE_LEN)?;

        let update = OrderNoteUpdate {
            note,
            expected_version: Some(order.version),
        };
        let updated = self
            .client
            .update_order_note(session, &order.id, &update)
            .await?;
        tracing::info!(order_id = %order.id, "Order note updated");
        self.registry.refetch(&[Resource::Orders]);
        Ok(updated)
    }

    /// Filter a polled snapshot
    pub fn list(&self, orders: &[Order], filter: &OrderFilter) -> Vec<Order> {
        filter.apply(orders)
    }

    /// Fetch and filter in one go, bypassing any poller
    pub async fn fetch(&self, session: &Session, filter: &OrderFilter) -> ClientResult<Vec<Order>> {
        let orders = self.client.list_orders(session).await?;
        Ok(filter.apply(&orders))
    }

    fn after_mutation(&self, order: &Order) {
        if order.is_dine_in() {
            self.registry.refetch(&[Resource::Orders, Resource::Tables]);
        } else {
            self.registry.refetch(&[Resource::Orders]);
        }
    }
}
