//! Order and line item types

use super::OrderStatus;
use crate::money::{self, to_decimal, to_f64};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Service Type
// ============================================================================

/// Where the order is consumed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// Seated at a table
    #[default]
    DineIn,
    /// Online or counter order with no table
    Takeout,
}

// ============================================================================
// Line Items
// ============================================================================

/// Line item. Name and price are snapshotted from the product when the item is
/// added, so later catalog edits do not change existing orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    /// Unit price at the time the item was added
    pub price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl OrderItem {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            quantity,
            note: None,
            category: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// `price × quantity`, rounded to cents
    pub fn line_total(&self) -> f64 {
        to_f64(money::line_total(self.price, self.quantity))
    }
}

/// Σ price × quantity, rounded to cents
pub fn items_subtotal(items: &[OrderItem]) -> f64 {
    let sum: Decimal = items
        .iter()
        .map(|i| money::line_total(i.price, i.quantity))
        .sum();
    to_f64(sum)
}

// ============================================================================
// Order
// ============================================================================

/// Order as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// `None` for takeout / online orders (the wire sentinel `0` decodes to `None`)
    #[serde(default, deserialize_with = "table_number_sentinel")]
    pub table_number: Option<u32>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: OrderStatus,
    /// User id of the staff member or customer who placed the order
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Bumped by the backend on every mutation
    #[serde(default)]
    pub version: u64,
}

fn table_number_sentinel<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<u32>::deserialize(deserializer)?;
    Ok(raw.filter(|n| *n != 0))
}

impl Order {
    pub fn service_type(&self) -> ServiceType {
        match self.table_number {
            Some(_) => ServiceType::DineIn,
            None => ServiceType::Takeout,
        }
    }

    pub fn is_dine_in(&self) -> bool {
        self.table_number.is_some()
    }

    /// Σ price × quantity over the current items
    pub fn computed_subtotal(&self) -> f64 {
        items_subtotal(&self.items)
    }

    /// Stored subtotal agrees with the items to the cent
    pub fn subtotal_matches(&self) -> bool {
        money::money_eq(self.subtotal, self.computed_subtotal())
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Not yet paid
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }

    pub fn is_payable(&self) -> bool {
        self.status.is_payable()
    }

    /// `"Mesa 4"` or `"Para llevar"`
    pub fn table_label(&self) -> String {
        match self.table_number {
            Some(n) => format!("Mesa {n}"),
            None => "Para llevar".to_string(),
        }
    }

    /// Short id for tickets and logs
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }

    /// Minutes since the order was placed
    pub fn age_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_minutes().max(0)
    }

    /// Total rounded subtotal as Decimal
    pub fn subtotal_decimal(&self) -> Decimal {
        money::round(to_decimal(self.subtotal))
    }
}

// ============================================================================
// Request payloads
// ============================================================================

/// Create order payload (`POST /orders`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    /// Wire sentinel `0` for takeout
    #[serde(serialize_with = "serialize_table_number")]
    pub table_number: Option<u32>,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: OrderStatus,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
}

fn serialize_table_number<S>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u32(value.unwrap_or(0))
}

/// Status change payload (`PUT /orders/{id}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    /// Rejected with 409 when the stored order has moved on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
}

/// Note edit payload (`PUT /orders/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNoteUpdate {
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<u64>,
}
