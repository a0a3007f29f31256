//! Restaurant configuration (`/configuration`)

use super::payment::ChargeRates;
use serde::{Deserialize, Serialize};

/// Business settings edited by the administrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantConfig {
    pub name: String,
    /// Tax identification number printed on invoices
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default = "default_service_percent")]
    pub service_charge_percent: f64,
    #[serde(default = "default_tax_percent")]
    pub tax_percent: f64,
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_footer: Option<String>,
}

fn default_service_percent() -> f64 {
    10.0
}

fn default_tax_percent() -> f64 {
    19.0
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            name: "SIREST".to_string(),
            tax_id: String::new(),
            address: String::new(),
            phone: None,
            email: None,
            service_charge_percent: default_service_percent(),
            tax_percent: default_tax_percent(),
            currency_symbol: default_currency(),
            invoice_footer: None,
        }
    }
}

impl RestaurantConfig {
    pub fn rates(&self) -> ChargeRates {
        ChargeRates {
            service_percent: self.service_charge_percent,
            tax_percent: self.tax_percent,
        }
    }
}
