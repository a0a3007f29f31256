//! Administrator dashboard

use super::{Snapshots, render_heading};
use crate::render::TextBuilder;
use crate::reports::SalesSummary;
use shared::models::{Role, StaffStatus, StockAlert};
use shared::money::format_money;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kpis {
    pub sales_today: f64,
    pub payments_today: u32,
    pub average_ticket: f64,
    pub orders_today: usize,
    /// Unpaid orders regardless of when they were placed
    pub open_orders: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminView {
    pub kpis: Kpis,
    pub summary: SalesSummary,
    pub stock_alerts: Vec<StockAlert>,
    pub staff: Vec<StaffStatus>,
    pub users_by_role: Vec<(Role, usize)>,
}

impl AdminView {
    pub fn build(snap: &Snapshots) -> Self {
        let summary = SalesSummary::for_date(snap.now.date_naive(), &snap.orders, &snap.payments);
        let kpis = Kpis {
            sales_today: summary.total_sales,
            payments_today: summary.payment_count,
            average_ticket: summary.average_ticket,
            orders_today: summary.orders_by_status.iter().map(|(_, n)| n).sum(),
            open_orders: snap.orders.iter().filter(|o| o.is_open()).count(),
        };

        let users_by_role = Role::ALL
            .iter()
            .map(|r| (*r, snap.users.iter().filter(|u| u.role == *r).count()))
            .collect();

        let mut staff = snap.staff.clone();
        staff.sort_by(|a, b| b.active.cmp(&a.active).then_with(|| a.name.cmp(&b.name)));

        Self {
            kpis,
            summary,
            stock_alerts: merge_alerts(&snap.alerts, &StockAlert::scan(&snap.products)),
            staff,
            users_by_role,
        }
    }

    pub(crate) fn render(&self, b: &mut TextBuilder, currency: &str) {
        b.center("ADMINISTRACIÓN");
        b.blank();
        b.line_lr("Ventas hoy", &format_money(currency, self.kpis.sales_today));
        b.line_lr("Pagos hoy", &self.kpis.payments_today.to_string());
        b.line_lr("Ticket promedio", &format_money(currency, self.kpis.average_ticket));
        b.line_lr("Pedidos hoy", &self.kpis.orders_today.to_string());
        b.line_lr("Pedidos abiertos", &self.kpis.open_orders.to_string());

        render_heading(b, "Pedidos por estado", self.kpis.orders_today);
        for (status, n) in &self.summary.orders_by_status {
            b.line_lr(status.label(), &n.to_string());
        }

        render_heading(b, "Más vendidos", self.summary.top_products.len());
        for p in &self.summary.top_products {
            b.line_lr(
                &format!("{}x {}", p.quantity, p.name),
                &format_money(currency, p.revenue),
            );
        }

        render_heading(b, "Alertas de inventario", self.stock_alerts.len());
        for a in &self.stock_alerts {
            b.line_lr(&a.product_name, &format!("{} {}/{}", a.level.label(), a.stock, a.min_stock));
        }

        render_heading(b, "Personal", self.staff.len());
        for s in &self.staff {
            let state = if s.active { "activo" } else { "inactivo" };
            b.line_lr(
                &format!("{} ({})", s.name, s.role.label()),
                &format!("{state} {}", s.orders_today),
            );
        }

        render_heading(b, "Usuarios", self.users_by_role.iter().map(|(_, n)| n).sum());
        for (role, n) in &self.users_by_role {
            b.line_lr(role.label(), &n.to_string());
        }
    }
}

/// Backend alerts first, then locally detected ones it did not report
fn merge_alerts(reported: &[StockAlert], scanned: &[StockAlert]) -> Vec<StockAlert> {
    let known: HashSet<&str> = reported.iter().map(|a| a.product_id.as_str()).collect();
    let mut out = reported.to_vec();
    out.extend(
        scanned
            .iter()
            .filter(|a| !known.contains(a.product_id.as_str()))
            .cloned(),
    );
    out
}
