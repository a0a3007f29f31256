//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Table occupancy status as stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TableStatus {
    #[default]
    #[serde(rename = "disponible", alias = "available")]
    Available,
    #[serde(rename = "ocupada", alias = "occupied")]
    Occupied,
    #[serde(rename = "reservada", alias = "reserved")]
    Reserved,
    #[serde(rename = "pagando", alias = "paying")]
    Paying,
}

impl TableStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TableStatus::Available => "disponible",
            TableStatus::Occupied => "ocupada",
            TableStatus::Reserved => "reservada",
            TableStatus::Paying => "pagando",
        }
    }
}

/// Dining table entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: String,
    pub number: u32,
    pub capacity: u32,
    #[serde(default)]
    pub status: TableStatus,
}

/// Update dining table payload (`PUT /tables/:id`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TableStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl DiningTableUpdate {
    pub fn status(status: TableStatus) -> Self {
        Self {
            status: Some(status),
            capacity: None,
        }
    }
}
