//! Customer screen

use super::{MenuSection, Snapshots, menu, render_heading, render_menu};
use crate::render::TextBuilder;
use shared::money::format_money;
use shared::order::{Order, OrderStatus};

/// One of the customer's orders and how far along it is
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOrder {
    pub order: Order,
    /// Position of the status in the lifecycle, 0 for pending
    pub step: usize,
    pub percent: u8,
}

impl ClientOrder {
    pub fn new(order: &Order) -> Self {
        let step = OrderStatus::ALL
            .iter()
            .position(|s| *s == order.status)
            .unwrap_or_default();
        let last = OrderStatus::ALL.len() - 1;
        Self {
            order: order.clone(),
            step,
            percent: (step * 100 / last) as u8,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientView {
    /// Unpaid orders, oldest first
    pub active: Vec<ClientOrder>,
    /// Paid orders, newest first
    pub history: Vec<ClientOrder>,
    pub menu: Vec<MenuSection>,
}

impl ClientView {
    pub fn build(snap: &Snapshots) -> Self {
        let mut mine: Vec<&Order> = snap
            .orders
            .iter()
            .filter(|o| o.created_by == snap.viewer_id)
            .collect();
        mine.sort_by_key(|o| o.created_at);

        let active = mine
            .iter()
            .filter(|o| o.is_open())
            .map(|o| ClientOrder::new(o))
            .collect();
        let history = mine
            .iter()
            .rev()
            .filter(|o| !o.is_open())
            .map(|o| ClientOrder::new(o))
            .collect();

        Self {
            active,
            history,
            menu: menu(&snap.products),
        }
    }

    pub(crate) fn render(&self, b: &mut TextBuilder, currency: &str) {
        b.center("MIS PEDIDOS");
        render_heading(b, "En curso", self.active.len());
        for c in &self.active {
            b.line_lr(
                &format!("#{} {}", c.order.short_id(), c.order.table_label()),
                &format_money(currency, c.order.subtotal),
            );
            b.line_lr(&format!("  {}", c.order.status.label()), &format!("{}%", c.percent));
        }
        render_heading(b, "Historial", self.history.len());
        for c in &self.history {
            b.line_lr(
                &format!("#{} {}", c.order.short_id(), c.order.created_at.format("%d/%m %H:%M")),
                &format_money(currency, c.order.subtotal),
            );
        }
        render_heading(b, "Menú", self.menu.iter().map(|s| s.products.len()).sum());
        render_menu(b, &self.menu, currency);
    }
}
