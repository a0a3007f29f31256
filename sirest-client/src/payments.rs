//! Payment settlement

use crate::error::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::orders::OrderService;
use crate::poller::Resource;
use crate::session::Session;
use shared::error::{AppError, ErrorCode};
use shared::models::{Payment, PaymentBreakdown, PaymentCreate, PaymentMethod, RestaurantConfig};
use shared::money;
use shared::order::{Order, OrderStatus, lifecycle};
use uuid::Uuid;

/// What the cashier entered
#[derive(Debug, Clone, PartialEq)]
pub struct SettleRequest {
    pub method: PaymentMethod,
    pub include_service: bool,
    pub tip: f64,
    /// Cash handed over; ignored for non-cash methods
    pub received: Option<f64>,
    /// Reuse the same request to retry without double-charging
    pub idempotency_key: Uuid,
}

impl SettleRequest {
    pub fn new(method: PaymentMethod) -> Self {
        Self {
            method,
            include_service: false,
            tip: 0.0,
            received: None,
            idempotency_key: Uuid::new_v4(),
        }
    }

    pub fn with_service(mut self) -> Self {
        self.include_service = true;
        self
    }

    pub fn with_tip(mut self, tip: f64) -> Self {
        self.tip = tip;
        self
    }

    pub fn with_received(mut self, received: f64) -> Self {
        self.received = Some(received);
        self
    }
}

/// Outcome of a successful settle
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub payment: Payment,
    /// The order, now `paid`
    pub order: Order,
    pub change: Option<f64>,
}

/// Breakdown the cashier would charge for `order` under `config`
pub fn quote(
    order: &Order,
    config: &RestaurantConfig,
    include_service: bool,
    tip: f64,
) -> PaymentBreakdown {
    PaymentBreakdown::compute(order.subtotal, config.rates(), include_service, tip)
}

/// Payment already stored for `order_id` under another settle attempt.
/// A payment carrying `key` is a retry of the same attempt and is not returned.
pub fn existing_charge<'a>(
    payments: &'a [Payment],
    order_id: &str,
    key: Uuid,
) -> Option<&'a Payment> {
    payments
        .iter()
        .find(|p| p.order_id == order_id && p.idempotency_key != Some(key))
}

#[derive(Debug)]
pub struct PaymentService<C: HttpClient = NetworkHttpClient> {
    orders: OrderService<C>,
}

impl<C: HttpClient> Clone for PaymentService<C> {
    fn clone(&self) -> Self {
        Self {
            orders: self.orders.clone(),
        }
    }
}

impl<C: HttpClient> PaymentService<C> {
    pub fn new(orders: OrderService<C>) -> Self {
        Self { orders }
    }

    /// Charge a ready or served order, then mark it paid.
    ///
    /// An order that already has a payment from another attempt is refused
    /// before anything is written. The payment carries the order version, so
    /// a backend holding a newer version answers 409 without storing it.
    ///
    /// If the payment is stored but the status update fails, the error is
    /// returned and the same `req` can be resubmitted; the idempotency key
    /// lets the backend drop the duplicate payment.
    pub async fn settle(
        &self,
        session: &Session,
        order: &Order,
        config: &RestaurantConfig,
        req: &SettleRequest,
    ) -> ClientResult<Settlement> {
        lifecycle::check(order, OrderStatus::Paid, session.role())?;
        if !req.tip.is_finite() || req.tip < 0.0 {
            return Err(AppError::validation(format!(
                "tip must be a non-negative number, got {}",
                req.tip
            ))
            .into());
        }

        let breakdown = quote(order, config, req.include_service, req.tip);
        let total = breakdown.total();

        let (received, change) = if req.method.gives_change() {
            let received = req.received.unwrap_or(total);
            let change = money::change_due(total, received).ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::PaymentInsufficientAmount,
                    format!("received {received} is less than total {total}"),
                )
            })?;
            (Some(money::round_f64(received)), Some(change))
        } else {
            (None, None)
        };

        let stored = self.orders.client().list_payments(session).await?;
        if let Some(existing) = existing_charge(&stored, &order.id, req.idempotency_key) {
            tracing::warn!(
                order_id = %order.id,
                payment_id = %existing.id,
                "Order already has a payment"
            );
            self.orders.registry().refetch(&[Resource::Payments, Resource::Orders]);
            return Err(AppError::with_message(
                ErrorCode::OrderAlreadyPaid,
                format!("order {} already has payment {}", order.id, existing.id),
            )
            .into());
        }

        let create = PaymentCreate {
            order_id: order.id.clone(),
            breakdown,
            total,
            method: req.method,
            received,
            change,
            idempotency_key: req.idempotency_key,
            expected_order_version: order.version,
        };
        let payment = self.orders.client().create_payment(session, &create).await?;
        tracing::info!(
            order_id = %order.id,
            payment_id = %payment.id,
            method = ?req.method,
            total,
            "Payment recorded"
        );

        let paid = match self.orders.put_status(session, order, OrderStatus::Paid).await {
            Ok(o) => o,
            Err(e) => {
                tracing::warn!(
                    order_id = %order.id,
                    payment_id = %payment.id,
                    error = %e,
                    "Payment stored but order not marked paid"
                );
                self.orders.registry().refetch(&[Resource::Payments]);
                return Err(e);
            }
        };
        self.orders
            .registry()
            .refetch(&[Resource::Payments, Resource::Orders, Resource::Tables]);

        Ok(Settlement {
            payment,
            order: paid,
            change,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::order::OrderItem;

    #[test]
    fn test_quote_uses_configured_rates() {
        let order = Order {
            id: "o1".into(),
            table_number: Some(1),
            items: vec![OrderItem::new("p1", "Sopa", 100.0, 1)],
            subtotal: 100.0,
            note: None,
            status: OrderStatus::Ready,
            created_by: "u".into(),
            created_by_name: None,
            customer_name: None,
            customer_phone: None,
            created_at: Utc::now(),
            updated_at: None,
            version: 1,
        };
        let config = RestaurantConfig::default();
        assert_eq!(quote(&order, &config, false, 0.0).total(), 119.0);
        assert_eq!(quote(&order, &config, true, 0.0).total(), 129.0);

        let config = RestaurantConfig {
            tax_percent: 8.0,
            ..RestaurantConfig::default()
        };
        assert_eq!(quote(&order, &config, false, 2.0).total(), 110.0);
    }

    #[test]
    fn test_existing_charge_ignores_same_attempt() {
        let key = Uuid::new_v4();
        let payment = Payment {
            id: "pay-1".into(),
            order_id: "o1".into(),
            breakdown: None,
            total: 119.0,
            method: PaymentMethod::Card,
            received: None,
            change: None,
            created_by: "cajero".into(),
            created_at: Utc::now(),
            idempotency_key: Some(key),
        };
        let payments = vec![payment];
        assert!(existing_charge(&payments, "o1", key).is_none());
        assert_eq!(
            existing_charge(&payments, "o1", Uuid::new_v4()).map(|p| p.id.as_str()),
            Some("pay-1")
        );
        assert!(existing_charge(&payments, "o2", Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_settle_request_builder() {
        let a = SettleRequest::new(PaymentMethod::Cash).with_received(150.0);
        let b = SettleRequest::new(PaymentMethod::Cash).with_received(150.0);
        assert_ne!(a.idempotency_key, b.idempotency_key);
        assert_eq!(a.received, Some(150.0));
        assert!(!a.include_service);
    }
}
