//! Stock alerts (`/alerts`) and staff activity (`/staff-status`)

use super::{Product, Role, StockLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Low-stock alert for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAlert {
    pub product_id: String,
    pub product_name: String,
    pub stock: i64,
    pub min_stock: i64,
    pub level: StockLevel,
}

impl StockAlert {
    /// Alert for a product that needs attention, `None` when stock is normal
    pub fn for_product(product: &Product) -> Option<Self> {
        let level = product.stock_level();
        level.needs_attention().then(|| Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            stock: product.stock,
            min_stock: product.min_stock,
            level,
        })
    }

    /// Alerts for a catalog snapshot, out-of-stock first
    pub fn scan(products: &[Product]) -> Vec<Self> {
        let mut alerts: Vec<Self> = products.iter().filter_map(Self::for_product).collect();
        alerts.sort_by_key(|a| (a.level != StockLevel::OutOfStock, a.stock));
        alerts
    }
}

/// Activity summary for one staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffStatus {
    pub user_id: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub active: bool,
    /// Orders handled today (created, prepared or charged depending on role)
    #[serde(default)]
    pub orders_today: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
}
