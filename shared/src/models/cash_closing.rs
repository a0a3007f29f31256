//! Cash Closing Model (cierre de caja)

use super::PaymentMethod;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Totals for one payment method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodBreakdown {
    pub method: PaymentMethod,
    /// Total amount
    pub amount: f64,
    /// Number of payments
    pub count: u32,
}

/// End-of-shift cash closing, computed from the day's payments and posted to
/// `/cash-closing`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashClosing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub business_date: NaiveDate,
    pub payment_count: u32,
    pub total_sales: f64,
    pub total_subtotal: f64,
    pub total_service: f64,
    pub total_tax: f64,
    pub total_tips: f64,
    #[serde(default)]
    pub by_method: Vec<PaymentMethodBreakdown>,
    /// Cash the drawer should hold (cash payments minus change handed out)
    pub expected_cash: f64,
    /// Cash counted by the cashier
    pub counted_cash: f64,
    /// `counted_cash - expected_cash`
    pub difference: f64,
    /// Payments without a stored breakdown whose split was estimated
    #[serde(default)]
    pub estimated_payments: u32,
    pub generated_by: String,
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
