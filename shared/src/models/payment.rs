//! Payment Model

use crate::money::{self, percent_of, to_decimal, to_f64};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Service charge assumed when a breakdown has to be rebuilt from a total
pub const RECONSTRUCT_SERVICE_PERCENT: u32 = 10;
/// Tax assumed when a breakdown has to be rebuilt from a total
pub const RECONSTRUCT_TAX_PERCENT: u32 = 19;

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[serde(alias = "efectivo")]
    Cash,
    #[serde(alias = "tarjeta")]
    Card,
    #[serde(alias = "transferencia")]
    Transfer,
    #[serde(alias = "QR")]
    Qr,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Transfer,
        PaymentMethod::Qr,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Efectivo",
            PaymentMethod::Card => "Tarjeta",
            PaymentMethod::Transfer => "Transferencia",
            PaymentMethod::Qr => "QR",
        }
    }

    /// Only cash hands out change
    pub fn gives_change(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

/// Percentages applied on top of an order subtotal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeRates {
    pub service_percent: f64,
    pub tax_percent: f64,
}

impl Default for ChargeRates {
    fn default() -> Self {
        Self {
            service_percent: RECONSTRUCT_SERVICE_PERCENT as f64,
            tax_percent: RECONSTRUCT_TAX_PERCENT as f64,
        }
    }
}

/// Subtotal / service / tax / tip split of a payment
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub subtotal: f64,
    #[serde(default, alias = "service")]
    pub service_charge: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub tip: f64,
}

impl PaymentBreakdown {
    /// Compute a breakdown from an order subtotal.
    ///
    /// Service and tax are both applied to the subtotal, each rounded to cents.
    pub fn compute(subtotal: f64, rates: ChargeRates, include_service: bool, tip: f64) -> Self {
        let base = money::round(to_decimal(subtotal));
        let service = if include_service {
            percent_of(base, to_decimal(rates.service_percent))
        } else {
            Decimal::ZERO
        };
        let tax = percent_of(base, to_decimal(rates.tax_percent));
        Self {
            subtotal: to_f64(base),
            service_charge: to_f64(service),
            tax: to_f64(tax),
            tip: money::round_f64(tip.max(0.0)),
        }
    }

    /// Rebuild a breakdown from a bare total using the fixed 10% service +
    /// 19% tax markup.
    ///
    /// Lossy: the subtotal is `total / 1.29` rounded to cents and any rounding
    /// remainder is absorbed by the tax line so the total is preserved.
    pub fn reconstruct(total: f64) -> Self {
        let total = money::round(to_decimal(total));
        let factor = Decimal::ONE
            + Decimal::from(RECONSTRUCT_SERVICE_PERCENT + RECONSTRUCT_TAX_PERCENT)
                / Decimal::ONE_HUNDRED;
        let subtotal = money::round(total / factor);
        let service = percent_of(subtotal, Decimal::from(RECONSTRUCT_SERVICE_PERCENT));
        let tax = total - subtotal - service;
        Self {
            subtotal: to_f64(subtotal),
            service_charge: to_f64(service),
            tax: to_f64(tax),
            tip: 0.0,
        }
    }

    /// `subtotal + service + tax + tip`
    pub fn total(&self) -> f64 {
        to_f64(
            to_decimal(self.subtotal)
                + to_decimal(self.service_charge)
                + to_decimal(self.tax)
                + to_decimal(self.tip),
        )
    }
}

/// Settled payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub order_id: String,
    /// Absent on payments recorded before breakdowns were persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<PaymentBreakdown>,
    pub total: f64,
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<Uuid>,
}

/// Create payment payload (`POST /payments`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub order_id: String,
    pub breakdown: PaymentBreakdown,
    pub total: f64,
    pub method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    /// One key per settle attempt; lets the backend drop duplicate submissions
    pub idempotency_key: Uuid,
    /// Version of the order being charged; 409 if it changed
    pub expected_order_version: u64,
}

/// Request to e-mail an invoice (`POST /send-invoice-email`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceEmailRequest {
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    pub email: String,
    /// Rendered document body
    pub document: String,
}
