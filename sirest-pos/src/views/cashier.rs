//! Cashier screen (caja)

use super::{OrderCard, Snapshots, render_heading};
use crate::render::TextBuilder;
use crate::reports::SalesSummary;
use shared::models::{PaymentBreakdown, Role};
use shared::money::format_money;
use shared::order::OrderQueues;
use sirest_client::payments::quote;

/// A ready or served order with what it would cost under current rates
#[derive(Debug, Clone, PartialEq)]
pub struct PayableOrder {
    pub card: OrderCard,
    pub quote: PaymentBreakdown,
    pub quote_with_service: PaymentBreakdown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CashierView {
    pub payable: Vec<PayableOrder>,
    pub today: SalesSummary,
}

impl CashierView {
    pub fn build(snap: &Snapshots, role: Role) -> Self {
        let queues = OrderQueues::from_orders(&snap.orders);
        let payable = queues
            .payable()
            .into_iter()
            .map(|order| PayableOrder {
                card: OrderCard::new(order, role, snap.now),
                quote: quote(order, &snap.config, false, 0.0),
                quote_with_service: quote(order, &snap.config, true, 0.0),
            })
            .collect();
        Self {
            payable,
            today: SalesSummary::for_date(snap.now.date_naive(), &snap.orders, &snap.payments),
        }
    }

    pub(crate) fn render(&self, b: &mut TextBuilder, currency: &str) {
        b.center("CAJA");
        render_heading(b, "Por cobrar", self.payable.len());
        for p in &self.payable {
            p.card.render(b, currency);
            b.line_lr("  Total", &format_money(currency, p.quote.total()));
            b.line_lr(
                "  Con servicio",
                &format_money(currency, p.quote_with_service.total()),
            );
        }

        render_heading(b, "Ventas de hoy", self.today.payment_count as usize);
        for m in &self.today.by_method {
            b.line_lr(
                &format!("{} ({})", m.method.label(), m.count),
                &format_money(currency, m.amount),
            );
        }
        b.eq_sep();
        b.line_lr("TOTAL", &format_money(currency, self.today.total_sales));
    }
}
