//! Orders: types, status machine, lifecycle gate, cart and queues

pub mod draft;
pub mod lifecycle;
pub mod queue;
pub mod status;
pub mod types;

pub use draft::OrderDraft;
pub use lifecycle::{
    OrderAction, TransitionError, actions_for, available_targets, role_may, transition,
};
pub use queue::{OrderFilter, OrderQueues};
pub use status::{EDGES, OrderStatus};
pub use types::{
    Order, OrderCreate, OrderItem, OrderNoteUpdate, OrderStatusUpdate, ServiceType,
    items_subtotal,
};
