//! Waiter screen (mesero)

use super::tables::render_tables;
use super::{MenuSection, OrderCard, Snapshots, TableCard, menu, render_heading, render_menu, table_cards};
use crate::render::TextBuilder;
use shared::models::Role;
use shared::order::{OrderQueues, OrderStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct WaiterView {
    pub tables: Vec<TableCard>,
    /// Ready orders from any waiter, to be taken to the table
    pub ready_to_serve: Vec<OrderCard>,
    /// Orders this waiter placed that are served and awaiting payment
    pub my_served: Vec<OrderCard>,
    /// Orders this waiter placed that are still in the kitchen
    pub my_in_kitchen: usize,
    pub menu: Vec<MenuSection>,
}

impl WaiterView {
    pub fn build(snap: &Snapshots, role: Role) -> Self {
        let queues = OrderQueues::from_orders(&snap.orders);
        let mine = |o: &&shared::order::Order| o.created_by == snap.viewer_id;

        let ready_to_serve = queues
            .get(OrderStatus::Ready)
            .iter()
            .map(|o| OrderCard::new(o, role, snap.now))
            .collect();
        let my_served = queues
            .get(OrderStatus::Served)
            .iter()
            .filter(mine)
            .map(|o| OrderCard::new(o, role, snap.now))
            .collect();
        let my_in_kitchen = queues
            .get(OrderStatus::Pending)
            .iter()
            .chain(queues.get(OrderStatus::Preparing))
            .filter(mine)
            .count();

        Self {
            tables: table_cards(&snap.tables, &snap.orders),
            ready_to_serve,
            my_served,
            my_in_kitchen,
            menu: menu(&snap.products),
        }
    }

    pub(crate) fn render(&self, b: &mut TextBuilder, currency: &str) {
        b.center("MESERO");
        render_heading(b, "Mesas", self.tables.len());
        render_tables(b, &self.tables, currency);

        render_heading(b, "Listos para servir", self.ready_to_serve.len());
        for card in &self.ready_to_serve {
            card.render(b, currency);
        }
        render_heading(b, "Servidos por cobrar", self.my_served.len());
        for card in &self.my_served {
            card.render(b, currency);
        }
        b.blank();
        b.pair("En cocina", &self.my_in_kitchen.to_string());

        render_heading(b, "Menú", self.menu.iter().map(|s| s.products.len()).sum());
        render_menu(b, &self.menu, currency);
    }
}
