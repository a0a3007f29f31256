//! Product Model

use serde::{Deserialize, Serialize};

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Unit price in currency unit
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default, alias = "minStock")]
    pub min_stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Stock classification shown by inventory screens and alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Normal,
    /// At or below the minimum threshold ("crítico")
    Low,
    /// Nothing left ("agotado")
    OutOfStock,
}

impl StockLevel {
    pub fn classify(stock: i64, min_stock: i64) -> Self {
        if stock <= 0 {
            StockLevel::OutOfStock
        } else if stock <= min_stock {
            StockLevel::Low
        } else {
            StockLevel::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::Normal => "normal",
            StockLevel::Low => "crítico",
            StockLevel::OutOfStock => "agotado",
        }
    }

    pub fn needs_attention(&self) -> bool {
        !matches!(self, StockLevel::Normal)
    }
}

impl Product {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::classify(self.stock, self.min_stock)
    }

    /// Can be added to a new order
    pub fn is_orderable(&self) -> bool {
        self.available && self.stock > 0
    }
}

/// Create product payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    pub min_stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}
