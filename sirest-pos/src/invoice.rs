//! Invoice generation
//!
//! An invoice is built from an order plus, once charged, its payment. The
//! stored payment breakdown is used when present; older payments without one
//! are split from the total and the invoice is flagged approximate. Before a
//! payment exists the document is a pro-forma bill ("cuenta").

use crate::render::TextBuilder;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::models::{Payment, PaymentBreakdown, PaymentMethod, RestaurantConfig, UserProfile};
use shared::money::{self, format_money};
use shared::order::Order;

/// Where the figures on the invoice come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceKind {
    /// Stored payment breakdown
    Exact,
    /// Split rebuilt from the payment total
    Approximate,
    /// No payment yet
    ProForma,
}

impl InvoiceKind {
    pub fn title(&self) -> &'static str {
        match self {
            InvoiceKind::Exact | InvoiceKind::Approximate => "FACTURA DE VENTA",
            InvoiceKind::ProForma => "CUENTA (PRE-FACTURA)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceLine {
    pub quantity: u32,
    pub description: String,
    pub unit_price: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    pub kind: InvoiceKind,
    pub number: String,
    pub order_id: String,
    pub table_label: String,
    pub issued_at: DateTime<Utc>,
    pub store_name: String,
    pub tax_id: String,
    pub address: String,
    pub phone: Option<String>,
    pub footer: Option<String>,
    pub currency_symbol: String,
    /// Rate shown on the IVA line; `None` when the stored tax was not
    /// charged at the configured rate, or is estimated
    pub tax_percent: Option<f64>,
    pub waiter_name: Option<String>,
    pub customer_name: Option<String>,
    pub lines: Vec<InvoiceLine>,
    pub breakdown: PaymentBreakdown,
    pub total: f64,
    pub method: Option<PaymentMethod>,
    pub received: Option<f64>,
    pub change: Option<f64>,
}

impl Invoice {
    /// Build the invoice for `order`.
    ///
    /// Pro-forma bills include the configured service charge; the customer may
    /// still decline it at the till.
    pub fn build(
        order: &Order,
        payment: Option<&Payment>,
        waiter: Option<&UserProfile>,
        config: &RestaurantConfig,
    ) -> Self {
        let (kind, breakdown) = match payment {
            Some(p) => match p.breakdown {
                Some(b) => (InvoiceKind::Exact, b),
                None => (InvoiceKind::Approximate, PaymentBreakdown::reconstruct(p.total)),
            },
            None => (
                InvoiceKind::ProForma,
                PaymentBreakdown::compute(order.subtotal, config.rates(), true, 0.0),
            ),
        };
        let tax_percent = match kind {
            InvoiceKind::Exact => Some(config.tax_percent).filter(|&rate| {
                let at_rate = money::percent_of(
                    money::to_decimal(breakdown.subtotal),
                    money::to_decimal(rate),
                );
                money::money_eq(money::to_f64(at_rate), breakdown.tax)
            }),
            InvoiceKind::Approximate => None,
            InvoiceKind::ProForma => Some(config.tax_percent),
        };
        let total = match payment {
            Some(p) => money::round_f64(p.total),
            None => breakdown.total(),
        };

        let number = match payment {
            Some(p) => format!("FV-{}", short(&p.id)),
            None => format!("PF-{}", order.short_id()),
        };
        let issued_at = match payment {
            Some(p) => p.created_at,
            None => order.updated_at.unwrap_or(order.created_at),
        };

        let lines = order
            .items
            .iter()
            .map(|item| InvoiceLine {
                quantity: item.quantity,
                description: item.name.clone(),
                unit_price: item.price,
                amount: item.line_total(),
            })
            .collect();

        let waiter_name = waiter
            .map(|w| w.name.clone())
            .or_else(|| order.created_by_name.clone());

        Self {
            kind,
            number,
            order_id: order.id.clone(),
            table_label: order.table_label(),
            issued_at,
            store_name: config.name.clone(),
            tax_id: config.tax_id.clone(),
            address: config.address.clone(),
            phone: config.phone.clone(),
            footer: config.invoice_footer.clone(),
            currency_symbol: config.currency_symbol.clone(),
            tax_percent,
            waiter_name,
            customer_name: order.customer_name.clone(),
            lines,
            breakdown,
            total,
            method: payment.map(|p| p.method),
            received: payment.and_then(|p| p.received),
            change: payment.and_then(|p| p.change),
        }
    }

    pub fn approximate(&self) -> bool {
        self.kind == InvoiceKind::Approximate
    }

    pub fn is_paid(&self) -> bool {
        self.kind != InvoiceKind::ProForma
    }
}

fn short(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Fixed-width text rendering of an [`Invoice`]
pub struct InvoiceRenderer<'a> {
    invoice: &'a Invoice,
    width: usize,
}

impl<'a> InvoiceRenderer<'a> {
    pub fn new(invoice: &'a Invoice, width: usize) -> Self {
        Self { invoice, width }
    }

    fn money(&self, amount: f64) -> String {
        format_money(&self.invoice.currency_symbol, amount)
    }

    pub fn render(&self) -> String {
        let inv = self.invoice;
        let mut b = TextBuilder::new(self.width);

        b.center(&inv.store_name);
        if !inv.tax_id.is_empty() {
            b.center(&format!("NIT: {}", inv.tax_id));
        }
        if !inv.address.is_empty() {
            b.center(&inv.address);
        }
        if let Some(phone) = &inv.phone {
            b.center(&format!("Tel: {phone}"));
        }
        b.blank();

        b.line(inv.kind.title());
        b.line_lr(
            &format!("No: {}", inv.number),
            &inv.issued_at.format("%Y-%m-%d %H:%M").to_string(),
        );
        b.line_lr(&inv.table_label, &format!("Pedido: {}", short(&inv.order_id)));
        if let Some(waiter) = &inv.waiter_name {
            b.pair("Atendió", waiter);
        }
        if let Some(customer) = &inv.customer_name {
            b.pair("Cliente", customer);
        }
        b.eq_sep();

        self.render_lines(&mut b);
        b.dash_sep();
        self.render_totals(&mut b);

        if inv.approximate() {
            b.blank();
            b.line("* Desglose estimado a partir del total");
        }
        if let Some(footer) = &inv.footer {
            b.blank();
            b.center(footer);
        }
        b.finish()
    }

    fn render_lines(&self, b: &mut TextBuilder) {
        let amount_w = 12.min(b.width() / 3);
        let qty_w = 4;
        let desc_w = b.width().saturating_sub(qty_w + amount_w);
        b.columns(&[("UDS", qty_w), ("DESCRIPCION", desc_w), ("IMPORTE", amount_w)]);
        for line in &self.invoice.lines {
            let qty = line.quantity.to_string();
            let amount = self.money(line.amount);
            b.columns(&[
                (qty.as_str(), qty_w),
                (line.description.as_str(), desc_w),
                (amount.as_str(), amount_w),
            ]);
        }
    }

    fn render_totals(&self, b: &mut TextBuilder) {
        let inv = self.invoice;
        let bd = &inv.breakdown;
        b.line_lr("Subtotal", &self.money(bd.subtotal));
        if bd.service_charge > 0.0 {
            b.line_lr("Servicio", &self.money(bd.service_charge));
        }
        let tax_label = match inv.tax_percent {
            Some(rate) => format!("IVA {rate}%"),
            None => "IVA".to_string(),
        };
        b.line_lr(&tax_label, &self.money(bd.tax));
        if bd.tip > 0.0 {
            b.line_lr("Propina", &self.money(bd.tip));
        }
        b.eq_sep();
        b.line_lr("TOTAL", &self.money(inv.total));

        if let Some(method) = inv.method {
            b.blank();
            b.line_lr("Forma de pago", method.label());
            if let Some(received) = inv.received {
                b.line_lr("Recibido", &self.money(received));
            }
            if let Some(change) = inv.change {
                b.line_lr("Cambio", &self.money(change));
            }
        }
    }
}
