//! Sales reports and cash closing
//!
//! All sums run in `Decimal` and are rounded to cents once at the end.
//! Payments recorded without a breakdown are split with
//! [`PaymentBreakdown::reconstruct`] and counted as estimated.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::error::{AppError, AppResult};
use shared::models::{CashClosing, Payment, PaymentBreakdown, PaymentMethod, PaymentMethodBreakdown};
use shared::money::{to_decimal, to_f64};
use shared::order::{Order, OrderStatus};
use shared::validation::{MAX_NOTE_LEN, validate_optional_text};
use std::collections::{HashMap, HashSet};

pub use shared::money::change_due;

/// How many products the ranking keeps
pub const TOP_PRODUCTS: usize = 5;

/// One row of the best-sellers ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
    pub name: String,
    pub quantity: u32,
    pub revenue: f64,
}

/// Breakdown of a payment, rebuilt from the total when none was stored
pub fn effective_breakdown(payment: &Payment) -> (PaymentBreakdown, bool) {
    match payment.breakdown {
        Some(b) => (b, false),
        None => (PaymentBreakdown::reconstruct(payment.total), true),
    }
}

/// Day totals for the cashier and administrator screens
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub business_date: NaiveDate,
    pub payment_count: u32,
    pub total_sales: f64,
    pub total_subtotal: f64,
    pub total_service: f64,
    pub total_tax: f64,
    pub total_tips: f64,
    pub average_ticket: f64,
    /// Every payment method, including the ones with no payments
    pub by_method: Vec<PaymentMethodBreakdown>,
    /// Orders created that day, per status
    pub orders_by_status: Vec<(OrderStatus, usize)>,
    pub top_products: Vec<TopProduct>,
    pub estimated_payments: u32,
}

#[derive(Default)]
struct MethodTotals {
    amount: Decimal,
    count: u32,
}

impl SalesSummary {
    /// Summarize the payments made on `date` (UTC) and the orders created that day
    pub fn for_date(date: NaiveDate, orders: &[Order], payments: &[Payment]) -> Self {
        let day_payments: Vec<&Payment> = payments
            .iter()
            .filter(|p| p.created_at.date_naive() == date)
            .collect();

        let mut sales = Decimal::ZERO;
        let mut subtotal = Decimal::ZERO;
        let mut service = Decimal::ZERO;
        let mut tax = Decimal::ZERO;
        let mut tips = Decimal::ZERO;
        let mut estimated = 0u32;
        let mut methods: HashMap<PaymentMethod, MethodTotals> = HashMap::new();

        for payment in &day_payments {
            let (breakdown, approximate) = effective_breakdown(payment);
            if approximate {
                estimated += 1;
            }
            sales += to_decimal(payment.total);
            subtotal += to_decimal(breakdown.subtotal);
            service += to_decimal(breakdown.service_charge);
            tax += to_decimal(breakdown.tax);
            tips += to_decimal(breakdown.tip);

            let entry = methods.entry(payment.method).or_default();
            entry.amount += to_decimal(payment.total);
            entry.count += 1;
        }

        let by_method = PaymentMethod::ALL
            .iter()
            .map(|method| {
                let totals = methods.remove(method).unwrap_or_default();
                PaymentMethodBreakdown {
                    method: *method,
                    amount: to_f64(totals.amount),
                    count: totals.count,
                }
            })
            .collect();

        let payment_count = day_payments.len() as u32;
        let average_ticket = if payment_count == 0 {
            0.0
        } else {
            to_f64(sales / Decimal::from(payment_count))
        };

        let day_orders: Vec<&Order> = orders
            .iter()
            .filter(|o| o.created_at.date_naive() == date)
            .collect();
        let orders_by_status = OrderStatus::ALL
            .iter()
            .map(|s| (*s, day_orders.iter().filter(|o| o.status == *s).count()))
            .collect();

        let paid_ids: HashSet<&str> = day_payments.iter().map(|p| p.order_id.as_str()).collect();
        let sold: Vec<&Order> = orders
            .iter()
            .filter(|o| paid_ids.contains(o.id.as_str()))
            .collect();

        Self {
            business_date: date,
            payment_count,
            total_sales: to_f64(sales),
            total_subtotal: to_f64(subtotal),
            total_service: to_f64(service),
            total_tax: to_f64(tax),
            total_tips: to_f64(tips),
            average_ticket,
            by_method,
            orders_by_status,
            top_products: top_products(&sold, TOP_PRODUCTS),
            estimated_payments: estimated,
        }
    }

    /// Summary for the current UTC day
    pub fn today(orders: &[Order], payments: &[Payment]) -> Self {
        Self::for_date(Utc::now().date_naive(), orders, payments)
    }

    pub fn method(&self, method: PaymentMethod) -> Option<&PaymentMethodBreakdown> {
        self.by_method.iter().find(|m| m.method == method)
    }

    /// Cash the drawer should hold. Change handed out is already netted:
    /// a cash payment keeps `received - change`, which is its total.
    pub fn expected_cash(&self) -> f64 {
        self.method(PaymentMethod::Cash)
            .map(|m| m.amount)
            .unwrap_or_default()
    }
}

/// Best sellers by quantity, revenue breaking ties, then name
pub fn top_products<'a>(orders: &[&'a Order], limit: usize) -> Vec<TopProduct> {
    let mut acc: HashMap<&'a str, (u32, Decimal)> = HashMap::new();
    for order in orders {
        for item in &order.items {
            let entry = acc.entry(item.name.as_str()).or_default();
            entry.0 += item.quantity;
            entry.1 += to_decimal(item.price) * Decimal::from(item.quantity);
        }
    }
    let mut ranked: Vec<TopProduct> = acc
        .into_iter()
        .map(|(name, (quantity, revenue))| TopProduct {
            name: name.to_string(),
            quantity,
            revenue: to_f64(revenue),
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then(b.revenue.total_cmp(&a.revenue))
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(limit);
    ranked
}

/// Builds the end-of-shift [`CashClosing`] from a day's summary
#[derive(Debug, Clone)]
pub struct CashClosingBuilder {
    summary: SalesSummary,
    counted_cash: f64,
    note: Option<String>,
}

impl CashClosingBuilder {
    pub fn new(summary: SalesSummary) -> Self {
        Self {
            summary,
            counted_cash: 0.0,
            note: None,
        }
    }

    /// Cash counted in the drawer
    pub fn counted(mut self, amount: f64) -> Self {
        self.counted_cash = amount;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into()).filter(|n: &String| !n.trim().is_empty());
        self
    }

    pub fn build(self, generated_by: &str, generated_at: DateTime<Utc>) -> AppResult<CashClosing> {
        if !self.counted_cash.is_finite() || self.counted_cash < 0.0 {
            return Err(AppError::validation(format!(
                "counted cash must be a non-negative amount, got {}",
                self.counted_cash
            )));
        }
        validate_optional_text(&self.note, "note", MAX_NOTE_LEN)?;
        if generated_by.trim().is_empty() {
            return Err(AppError::required("generated_by"));
        }

        let expected = self.summary.expected_cash();
        let difference = to_f64(to_decimal(self.counted_cash) - to_decimal(expected));
        let s = self.summary;
        Ok(CashClosing {
            id: None,
            business_date: s.business_date,
            payment_count: s.payment_count,
            total_sales: s.total_sales,
            total_subtotal: s.total_subtotal,
            total_service: s.total_service,
            total_tax: s.total_tax,
            total_tips: s.total_tips,
            by_method: s.by_method,
            expected_cash: expected,
            counted_cash: shared::money::round_f64(self.counted_cash),
            difference,
            estimated_payments: s.estimated_payments,
            generated_by: generated_by.to_string(),
            generated_at,
            note: self.note,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::models::ChargeRates;
    use shared::order::OrderItem;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    fn order(id: &str, items: Vec<OrderItem>, status: OrderStatus, day: u32) -> Order {
        let subtotal = shared::order::items_subtotal(&items);
        Order {
            id: id.into(),
            table_number: Some(1),
            items,
            subtotal,
            note: None,
            status,
            created_by: "mesero".into(),
            created_by_name: None,
            customer_name: None,
            customer_phone: None,
            created_at: at(day, 12),
            updated_at: None,
            version: 1,
        }
    }

    fn payment(id: &str, order_id: &str, subtotal: f64, method: PaymentMethod, day: u32) -> Payment {
        let breakdown = PaymentBreakdown::compute(subtotal, ChargeRates::default(), false, 0.0);
        Payment {
            id: id.into(),
            order_id: order_id.into(),
            breakdown: Some(breakdown),
            total: breakdown.total(),
            method,
            received: None,
            change: None,
            created_by: "cajero".into(),
            created_at: at(day, 14),
            idempotency_key: None,
        }
    }

    fn fixture() -> (Vec<Order>, Vec<Payment>) {
        let orders = vec![
            order("o1", vec![OrderItem::new("p1", "Ajiaco", 100.0, 1)], OrderStatus::Paid, 10),
            order(
                "o2",
                vec![
                    OrderItem::new("p2", "Limonada", 5.0, 4),
                    OrderItem::new("p1", "Ajiaco", 100.0, 1),
                ],
                OrderStatus::Paid,
                10,
            ),
            order("o3", vec![OrderItem::new("p3", "Arepa", 3.0, 2)], OrderStatus::Pending, 10),
            order("o4", vec![OrderItem::new("p3", "Arepa", 3.0, 9)], OrderStatus::Paid, 9),
        ];
        let payments = vec![
            payment("pay1", "o1", 100.0, PaymentMethod::Cash, 10),
            payment("pay2", "o2", 120.0, PaymentMethod::Card, 10),
            payment("pay3", "o4", 27.0, PaymentMethod::Cash, 9),
        ];
        (orders, payments)
    }

    #[test]
    fn test_summary_for_date() {
        let (orders, payments) = fixture();
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let s = SalesSummary::for_date(date, &orders, &payments);

        assert_eq!(s.payment_count, 2);
        assert_eq!(s.total_sales, 261.8);
        assert_eq!(s.total_subtotal, 220.0);
        assert_eq!(s.total_tax, 41.8);
        assert_eq!(s.average_ticket, 130.9);
        assert_eq!(s.estimated_payments, 0);

        assert_eq!(s.by_method.len(), 4);
        let cash = s.method(PaymentMethod::Cash).unwrap();
        assert_eq!((cash.amount, cash.count), (119.0, 1));
        assert_eq!(s.method(PaymentMethod::Qr).unwrap().count, 0);

        assert!(s.orders_by_status.contains(&(OrderStatus::Paid, 2)));
        assert!(s.orders_by_status.contains(&(OrderStatus::Pending, 1)));

        // o4 was paid on another day
        assert_eq!(s.top_products[0].name, "Limonada");
        assert_eq!(s.top_products[0].quantity, 4);
        assert_eq!(s.top_products[1].name, "Ajiaco");
        assert_eq!(s.top_products[1].revenue, 200.0);
        assert_eq!(s.top_products.len(), 2);
    }

    #[test]
    fn test_summary_counts_estimated_payments() {
        let (orders, mut payments) = fixture();
        payments[0].breakdown = None;
        payments[0].total = 129.0;
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let s = SalesSummary::for_date(date, &orders, &payments);
        assert_eq!(s.estimated_payments, 1);
        assert_eq!(s.total_service, 10.0);
        assert_eq!(s.total_sales, 271.8);
    }

    #[test]
    fn test_empty_day() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let s = SalesSummary::for_date(date, &[], &[]);
        assert_eq!(s.payment_count, 0);
        assert_eq!(s.average_ticket, 0.0);
        assert!(s.top_products.is_empty());
        assert_eq!(s.expected_cash(), 0.0);
    }

    #[test]
    fn test_cash_closing_difference() {
        let (orders, payments) = fixture();
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let summary = SalesSummary::for_date(date, &orders, &payments);

        let closing = CashClosingBuilder::new(summary.clone())
            .counted(115.5)
            .note("faltante en monedas")
            .build("cajero", at(10, 22))
            .unwrap();
        assert_eq!(closing.expected_cash, 119.0);
        assert_eq!(closing.counted_cash, 115.5);
        assert_eq!(closing.difference, -3.5);
        assert_eq!(closing.total_sales, 261.8);
        assert_eq!(closing.note.as_deref(), Some("faltante en monedas"));

        let err = CashClosingBuilder::new(summary)
            .counted(f64::NAN)
            .build("cajero", at(10, 22))
            .unwrap_err();
        assert_eq!(err.code, shared::error::ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_change_due_reexport() {
        assert_eq!(change_due(119.0, 150.0), Some(31.0));
    }
}
