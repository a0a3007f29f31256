//! Kitchen screen (cocina)

use super::{OrderCard, Snapshots, render_heading};
use crate::render::TextBuilder;
use shared::models::Role;
use shared::order::{OrderQueues, OrderStatus};

/// Pending, preparing and ready queues, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct KitchenView {
    pub pending: Vec<OrderCard>,
    pub preparing: Vec<OrderCard>,
    pub ready: Vec<OrderCard>,
}

impl KitchenView {
    pub fn build(snap: &Snapshots, role: Role) -> Self {
        let queues = OrderQueues::from_orders(&snap.orders);
        let cards = |status| {
            queues
                .get(status)
                .iter()
                .map(|o| OrderCard::new(o, role, snap.now))
                .collect::<Vec<_>>()
        };
        Self {
            pending: cards(OrderStatus::Pending),
            preparing: cards(OrderStatus::Preparing),
            ready: cards(OrderStatus::Ready),
        }
    }

    pub(crate) fn render(&self, b: &mut TextBuilder, currency: &str) {
        b.center("COCINA");
        for (status, cards) in [
            (OrderStatus::Pending, &self.pending),
            (OrderStatus::Preparing, &self.preparing),
            (OrderStatus::Ready, &self.ready),
        ] {
            render_heading(b, status.label(), cards.len());
            for card in cards {
                card.render(b, currency);
            }
        }
    }
}
