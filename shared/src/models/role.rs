//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role, the only authorization axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "administrador", alias = "admin")]
    Admin,
    #[serde(rename = "mesero", alias = "waiter")]
    Waiter,
    #[serde(rename = "cajero", alias = "cashier")]
    Cashier,
    #[serde(rename = "cocinero", alias = "cook")]
    Cook,
    #[serde(rename = "cliente", alias = "client")]
    Client,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Waiter,
        Role::Cashier,
        Role::Cook,
        Role::Client,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "administrador",
            Role::Waiter => "mesero",
            Role::Cashier => "cajero",
            Role::Cook => "cocinero",
            Role::Client => "cliente",
        }
    }

    /// Display label for screens and receipts
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Waiter => "Mesero",
            Role::Cashier => "Cajero",
            Role::Cook => "Cocinero",
            Role::Client => "Cliente",
        }
    }

    /// Restaurant staff (everyone except customers)
    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Client)
    }

    /// Roles allowed to place orders
    pub fn can_place_orders(&self) -> bool {
        matches!(self, Role::Waiter | Role::Client)
    }

    /// Roles allowed to settle payments
    pub fn can_take_payments(&self) -> bool {
        matches!(self, Role::Cashier | Role::Admin)
    }

    /// Roles allowed to edit the catalog and users
    pub fn can_manage(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "administrador" | "admin" => Ok(Role::Admin),
            "mesero" | "waiter" => Ok(Role::Waiter),
            "cajero" | "cashier" => Ok(Role::Cashier),
            "cocinero" | "cook" => Ok(Role::Cook),
            "cliente" | "client" => Ok(Role::Client),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Cook).unwrap(), "\"cocinero\"");
        let role: Role = serde_json::from_str("\"mesero\"").unwrap();
        assert_eq!(role, Role::Waiter);
        let role: Role = serde_json::from_str("\"cashier\"").unwrap();
        assert_eq!(role, Role::Cashier);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("Administrador".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" cook ".parse::<Role>().unwrap(), Role::Cook);
        assert!("chef".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_capabilities() {
        assert!(Role::Waiter.can_place_orders());
        assert!(Role::Client.can_place_orders());
        assert!(!Role::Cook.can_place_orders());
        assert!(Role::Cashier.can_take_payments());
        assert!(!Role::Client.is_staff());
        assert!(Role::Admin.can_manage());
    }
}
