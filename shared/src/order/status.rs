//! Order status and the lifecycle edge table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status
///
/// ```text
/// pending ⇄ preparing → ready → served
///                         │        │
///                         └─→ paid ←┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[serde(alias = "pendiente")]
    Pending,
    #[serde(alias = "preparando")]
    Preparing,
    #[serde(alias = "listo")]
    Ready,
    #[serde(alias = "servido")]
    Served,
    #[serde(alias = "pagado")]
    Paid,
}

/// Every legal `(from, to)` edge. Nothing outside this table is reachable.
pub const EDGES: [(OrderStatus, OrderStatus); 6] = [
    (OrderStatus::Pending, OrderStatus::Preparing),
    (OrderStatus::Preparing, OrderStatus::Pending),
    (OrderStatus::Preparing, OrderStatus::Ready),
    (OrderStatus::Ready, OrderStatus::Served),
    (OrderStatus::Ready, OrderStatus::Paid),
    (OrderStatus::Served, OrderStatus::Paid),
];

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Paid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Paid => "paid",
        }
    }

    /// Label shown on screens
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendiente",
            OrderStatus::Preparing => "En preparación",
            OrderStatus::Ready => "Listo",
            OrderStatus::Served => "Servido",
            OrderStatus::Paid => "Pagado",
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        EDGES.contains(&(*self, next))
    }

    /// Statuses reachable in one step
    pub fn successors(&self) -> impl Iterator<Item = OrderStatus> + '_ {
        EDGES
            .iter()
            .filter(move |(from, _)| from == self)
            .map(|(_, to)| *to)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid)
    }

    /// The cashier may charge it
    pub fn is_payable(&self) -> bool {
        matches!(self, OrderStatus::Ready | OrderStatus::Served)
    }

    /// Shown on the kitchen board
    pub fn is_kitchen(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::Ready
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
