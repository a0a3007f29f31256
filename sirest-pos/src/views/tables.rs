//! Table status derived from orders

use crate::render::TextBuilder;
use shared::models::{DiningTable, TableStatus};
use shared::money::format_money;
use shared::order::{Order, OrderStatus};

/// Occupancy of `table` given the current orders.
///
/// A table is occupied while an unpaid order references it, and `pagando`
/// once every such order is payable and at least one has been served. With no
/// open orders a stored reservation is kept, anything else reads available.
pub fn derive_table_status(table: &DiningTable, orders: &[Order]) -> TableStatus {
    let mut open = orders
        .iter()
        .filter(|o| o.is_open() && o.table_number == Some(table.number))
        .peekable();

    if open.peek().is_none() {
        return match table.status {
            TableStatus::Reserved => TableStatus::Reserved,
            _ => TableStatus::Available,
        };
    }

    let mut all_payable = true;
    let mut any_served = false;
    for order in open {
        all_payable &= order.is_payable();
        any_served |= order.status == OrderStatus::Served;
    }
    if all_payable && any_served {
        TableStatus::Paying
    } else {
        TableStatus::Occupied
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCard {
    pub number: u32,
    pub capacity: u32,
    pub status: TableStatus,
    pub open_orders: usize,
    /// Sum of the open orders' subtotals
    pub open_amount: f64,
}

/// One card per table, by number
pub fn table_cards(tables: &[DiningTable], orders: &[Order]) -> Vec<TableCard> {
    let mut cards: Vec<TableCard> = tables
        .iter()
        .map(|table| {
            let open: Vec<&Order> = orders
                .iter()
                .filter(|o| o.is_open() && o.table_number == Some(table.number))
                .collect();
            let open_amount = shared::money::to_f64(open.iter().map(|o| o.subtotal_decimal()).sum());
            TableCard {
                number: table.number,
                capacity: table.capacity,
                status: derive_table_status(table, orders),
                open_orders: open.len(),
                open_amount,
            }
        })
        .collect();
    cards.sort_by_key(|c| c.number);
    cards
}

pub(crate) fn render_tables(b: &mut TextBuilder, cards: &[TableCard], currency: &str) {
    for card in cards {
        let right = if card.open_orders > 0 {
            format!("{} {}", card.status.label(), format_money(currency, card.open_amount))
        } else {
            card.status.label().to_string()
        };
        b.line_lr(&format!("Mesa {} ({}p)", card.number, card.capacity), &right);
    }
}
