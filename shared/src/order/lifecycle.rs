//! Order lifecycle gate
//!
//! Every status change, whatever screen it comes from, goes through
//! [`transition`]. The edge table lives in [`super::status::EDGES`]; this
//! module layers the per-role rules on top of it.

use super::{Order, OrderStatus};
use crate::error::{AppError, ErrorCode};
use crate::models::Role;
use chrono::Utc;
use thiserror::Error;

/// Why a status change was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("order {order_id} is already paid")]
    Terminal { order_id: String },

    #[error("order {order_id} cannot move from {from} to {to}")]
    IllegalEdge {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("{role} may not move order {order_id} from {from} to {to}")]
    RoleNotAllowed {
        order_id: String,
        role: Role,
        from: OrderStatus,
        to: OrderStatus,
    },
}

impl TransitionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TransitionError::Terminal { .. } => ErrorCode::OrderAlreadyPaid,
            TransitionError::IllegalEdge { .. } => ErrorCode::OrderInvalidTransition,
            TransitionError::RoleNotAllowed { .. } => ErrorCode::PermissionDenied,
        }
    }
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        AppError::with_message(err.code(), err.to_string())
    }
}

/// Whether `role` may drive the `from → to` edge. Does not check the edge
/// itself; see [`OrderStatus::can_transition_to`].
pub fn role_may(role: Role, from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    match role {
        Role::Admin => true,
        Role::Cook => matches!(
            (from, to),
            (Pending, Preparing) | (Preparing, Pending) | (Preparing, Ready)
        ),
        Role::Waiter => matches!((from, to), (Ready, Served)),
        Role::Cashier => matches!((from, to), (Ready, Paid) | (Served, Paid)),
        Role::Client => false,
    }
}

/// Statuses `role` can move an order in `status` to
pub fn available_targets(status: OrderStatus, role: Role) -> Vec<OrderStatus> {
    status
        .successors()
        .filter(|to| role_may(role, status, *to))
        .collect()
}

impl OrderStatus {
    /// Statuses `role` can move an order in this status to
    pub fn next_for(&self, role: Role) -> Vec<OrderStatus> {
        available_targets(*self, role)
    }
}

/// Check `order.status → requested` for `actor`.
pub fn check(order: &Order, requested: OrderStatus, actor: Role) -> Result<(), TransitionError> {
    let from = order.status;
    if from.is_terminal() {
        return Err(TransitionError::Terminal {
            order_id: order.id.clone(),
        });
    }
    if !from.can_transition_to(requested) {
        return Err(TransitionError::IllegalEdge {
            order_id: order.id.clone(),
            from,
            to: requested,
        });
    }
    if !role_may(actor, from, requested) {
        return Err(TransitionError::RoleNotAllowed {
            order_id: order.id.clone(),
            role: actor,
            from,
            to: requested,
        });
    }
    Ok(())
}

/// Apply a status change, returning the updated order.
///
/// The version is left untouched; the backend bumps it when it stores the
/// change.
pub fn transition(
    order: &Order,
    requested: OrderStatus,
    actor: Role,
) -> Result<Order, TransitionError> {
    check(order, requested, actor)?;
    let mut next = order.clone();
    next.status = requested;
    next.updated_at = Some(Utc::now());
    Ok(next)
}

// ============================================================================
// Actions
// ============================================================================

/// Button-level names for the lifecycle edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    StartPreparing,
    Pause,
    MarkReady,
    MarkServed,
    Charge,
}

impl OrderAction {
    pub fn for_edge(from: OrderStatus, to: OrderStatus) -> Option<Self> {
        use OrderStatus::*;
        match (from, to) {
            (Pending, Preparing) => Some(OrderAction::StartPreparing),
            (Preparing, Pending) => Some(OrderAction::Pause),
            (Preparing, Ready) => Some(OrderAction::MarkReady),
            (Ready, Served) => Some(OrderAction::MarkServed),
            (Ready, Paid) | (Served, Paid) => Some(OrderAction::Charge),
            _ => None,
        }
    }

    pub fn target(&self) -> OrderStatus {
        match self {
            OrderAction::StartPreparing => OrderStatus::Preparing,
            OrderAction::Pause => OrderStatus::Pending,
            OrderAction::MarkReady => OrderStatus::Ready,
            OrderAction::MarkServed => OrderStatus::Served,
            OrderAction::Charge => OrderStatus::Paid,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderAction::StartPreparing => "Preparar",
            OrderAction::Pause => "Pausar",
            OrderAction::MarkReady => "Marcar listo",
            OrderAction::MarkServed => "Marcar servido",
            OrderAction::Charge => "Cobrar",
        }
    }
}

/// Actions `role` can take on `order` right now
pub fn actions_for(order: &Order, role: Role) -> Vec<OrderAction> {
    available_targets(order.status, role)
        .into_iter()
        .filter_map(|to| OrderAction::for_edge(order.status, to))
        .collect()
}
