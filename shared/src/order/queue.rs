//! Orders grouped by status

use super::{Order, OrderStatus};
use chrono::{DateTime, Utc};

/// One queue per status, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderQueues {
    pub pending: Vec<Order>,
    pub preparing: Vec<Order>,
    pub ready: Vec<Order>,
    pub served: Vec<Order>,
    pub paid: Vec<Order>,
}

impl OrderQueues {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut queues = Self::default();
        for order in orders {
            queues.bucket_mut(order.status).push(order.clone());
        }
        for status in OrderStatus::ALL {
            queues
                .bucket_mut(status)
                .sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        }
        queues
    }

    pub fn get(&self, status: OrderStatus) -> &[Order] {
        match status {
            OrderStatus::Pending => &self.pending,
            OrderStatus::Preparing => &self.preparing,
            OrderStatus::Ready => &self.ready,
            OrderStatus::Served => &self.served,
            OrderStatus::Paid => &self.paid,
        }
    }

    fn bucket_mut(&mut self, status: OrderStatus) -> &mut Vec<Order> {
        match status {
            OrderStatus::Pending => &mut self.pending,
            OrderStatus::Preparing => &mut self.preparing,
            OrderStatus::Ready => &mut self.ready,
            OrderStatus::Served => &mut self.served,
            OrderStatus::Paid => &mut self.paid,
        }
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        self.get(status).len()
    }

    /// Orders not yet paid
    pub fn open_count(&self) -> usize {
        self.pending.len() + self.preparing.len() + self.ready.len() + self.served.len()
    }

    /// Ready and served orders, oldest first
    pub fn payable(&self) -> Vec<&Order> {
        let mut out: Vec<&Order> = self.ready.iter().chain(self.served.iter()).collect();
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        out
    }
}

/// Client-side order filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub statuses: Vec<OrderStatus>,
    pub table_number: Option<u32>,
    pub created_by: Option<String>,
    pub since: Option<DateTime<Utc>>,
}

impl OrderFilter {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            statuses: vec![status],
            ..Default::default()
        }
    }

    pub fn statuses(statuses: impl IntoIterator<Item = OrderStatus>) -> Self {
        Self {
            statuses: statuses.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn created_by(mut self, user_id: impl Into<String>) -> Self {
        self.created_by = Some(user_id.into());
        self
    }

    pub fn table(mut self, table_number: u32) -> Self {
        self.table_number = Some(table_number);
        self
    }

    pub fn since(mut self, at: DateTime<Utc>) -> Self {
        self.since = Some(at);
        self
    }

    pub fn matches(&self, order: &Order) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&order.status))
            && self.table_number.is_none_or(|t| order.table_number == Some(t))
            && self
                .created_by
                .as_ref()
                .is_none_or(|u| &order.created_by == u)
            && self.since.is_none_or(|s| order.created_at >= s)
    }

    pub fn apply(&self, orders: &[Order]) -> Vec<Order> {
        orders.iter().filter(|o| self.matches(o)).cloned().collect()
    }
}
