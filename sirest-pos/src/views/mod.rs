//! Role views
//!
//! Pure functions from polled snapshots to what each role sees. Every action
//! offered on an order comes from [`actions_for`], so a view can only offer
//! edges the lifecycle gate would accept.

pub mod admin;
pub mod cashier;
pub mod client;
pub mod kitchen;
pub mod tables;
pub mod waiter;

pub use admin::{AdminView, Kpis};
pub use cashier::{CashierView, PayableOrder};
pub use client::{ClientOrder, ClientView};
pub use kitchen::KitchenView;
pub use tables::{TableCard, derive_table_status, table_cards};
pub use waiter::WaiterView;

use crate::render::TextBuilder;
use chrono::{DateTime, Utc};
use shared::models::{
    DiningTable, Payment, Product, RestaurantConfig, Role, StaffStatus, StockAlert, UserProfile,
};
use shared::money::format_money;
use shared::order::{Order, OrderAction, actions_for};
use std::collections::BTreeMap;

/// Last successful poll of every resource a view may read
#[derive(Debug, Clone)]
pub struct Snapshots {
    pub orders: Vec<Order>,
    pub products: Vec<Product>,
    pub tables: Vec<DiningTable>,
    pub payments: Vec<Payment>,
    pub users: Vec<UserProfile>,
    pub alerts: Vec<StockAlert>,
    pub staff: Vec<StaffStatus>,
    pub config: RestaurantConfig,
    /// Account looking at the screen
    pub viewer_id: String,
    pub now: DateTime<Utc>,
}

impl Snapshots {
    pub fn new(viewer_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            orders: Vec::new(),
            products: Vec::new(),
            tables: Vec::new(),
            payments: Vec::new(),
            users: Vec::new(),
            alerts: Vec::new(),
            staff: Vec::new(),
            config: RestaurantConfig::default(),
            viewer_id: viewer_id.into(),
            now,
        }
    }
}

/// Which pollers a role's screen needs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Feeds {
    pub orders: bool,
    pub products: bool,
    pub tables: bool,
    pub payments: bool,
    pub users: bool,
    pub alerts: bool,
    pub staff: bool,
}

impl Feeds {
    pub fn for_role(role: Role) -> Self {
        let orders_only = Self {
            orders: true,
            ..Self::default()
        };
        match role {
            Role::Cook => orders_only,
            Role::Waiter => Self {
                products: true,
                tables: true,
                ..orders_only
            },
            Role::Cashier => Self {
                payments: true,
                ..orders_only
            },
            Role::Client => Self {
                products: true,
                ..orders_only
            },
            Role::Admin => Self {
                orders: true,
                products: true,
                tables: true,
                payments: true,
                users: true,
                alerts: true,
                staff: true,
            },
        }
    }
}

/// An order as shown on a card, with the buttons the viewer may press
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCard {
    pub order: Order,
    pub age_minutes: i64,
    pub actions: Vec<OrderAction>,
}

impl OrderCard {
    pub fn new(order: &Order, role: Role, now: DateTime<Utc>) -> Self {
        Self {
            order: order.clone(),
            age_minutes: order.age_minutes(now),
            actions: actions_for(order, role),
        }
    }

    pub(crate) fn render(&self, b: &mut TextBuilder, currency: &str) {
        let o = &self.order;
        b.line_lr(
            &format!("#{} {}", o.short_id(), o.table_label()),
            &format!("{} min", self.age_minutes),
        );
        for item in &o.items {
            let line = match &item.note {
                Some(note) => format!("  {}x {} ({note})", item.quantity, item.name),
                None => format!("  {}x {}", item.quantity, item.name),
            };
            b.line(&line);
        }
        if let Some(note) = &o.note {
            b.line(&format!("  Nota: {note}"));
        }
        let actions: Vec<String> = self.actions.iter().map(|a| format!("[{}]", a.label())).collect();
        b.line_lr(&actions.join(" "), &format_money(currency, o.subtotal));
    }
}

/// Orderable products grouped by category
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection {
    pub category: String,
    pub products: Vec<Product>,
}

pub fn menu(products: &[Product]) -> Vec<MenuSection> {
    let mut sections: BTreeMap<&str, Vec<Product>> = BTreeMap::new();
    for product in products.iter().filter(|p| p.is_orderable()) {
        sections
            .entry(product.category.as_str())
            .or_default()
            .push(product.clone());
    }
    sections
        .into_iter()
        .map(|(category, mut products)| {
            products.sort_by(|a, b| a.name.cmp(&b.name));
            MenuSection {
                category: category.to_string(),
                products,
            }
        })
        .collect()
}

pub(crate) fn render_menu(b: &mut TextBuilder, sections: &[MenuSection], currency: &str) {
    for section in sections {
        b.line(&section.category.to_uppercase());
        for p in &section.products {
            b.line_lr(&format!("  {}", p.name), &format_money(currency, p.price));
        }
    }
}

pub(crate) fn render_heading(b: &mut TextBuilder, title: &str, count: usize) {
    b.blank();
    b.line(&format!("{title} ({count})"));
    b.dash_sep();
}

/// The screen for one role
#[derive(Debug, Clone, PartialEq)]
pub enum RoleView {
    Kitchen(KitchenView),
    Waiter(WaiterView),
    Cashier(CashierView),
    Admin(AdminView),
    Client(ClientView),
}

impl RoleView {
    pub fn render(&self, width: usize, currency: &str) -> String {
        let mut b = TextBuilder::new(width);
        match self {
            RoleView::Kitchen(v) => v.render(&mut b, currency),
            RoleView::Waiter(v) => v.render(&mut b, currency),
            RoleView::Cashier(v) => v.render(&mut b, currency),
            RoleView::Admin(v) => v.render(&mut b, currency),
            RoleView::Client(v) => v.render(&mut b, currency),
        }
        b.finish()
    }
}

/// Build the screen `role` sees from the current snapshots
pub fn for_role(role: Role, snap: &Snapshots) -> RoleView {
    match role {
        Role::Cook => RoleView::Kitchen(KitchenView::build(snap, role)),
        Role::Waiter => RoleView::Waiter(WaiterView::build(snap, role)),
        Role::Cashier => RoleView::Cashier(CashierView::build(snap, role)),
        Role::Admin => RoleView::Admin(AdminView::build(snap)),
        Role::Client => RoleView::Client(ClientView::build(snap)),
    }
}
