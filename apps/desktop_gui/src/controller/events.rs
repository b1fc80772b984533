//! Events pushed from the backend worker to the UI.

use shared::domain::Order;

pub enum UiEvent {
    /// Worker lifecycle/status text for the status line.
    Info(String),
    /// Result of a fetch-by-uid lookup.
    OrderLoaded(Box<Order>),
    OrderLookupFailed(String),
    /// Result of a full-list fetch (manual or auto-refresh).
    OrdersLoaded(Vec<Order>),
    OrdersLoadFailed(String),
    /// Result of a fake-order generation request.
    OrderGenerated {
        order_uid: String,
        order: Option<Box<Order>>,
    },
    OrderGenerationFailed(String),
}
