//! Request/response envelopes for the order tracking REST API.

use serde::{Deserialize, Serialize};

use crate::domain::Order;

/// Response body of `POST /api/fake/generate`. The backend may omit the
/// echoed order while still reporting the new uid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedOrder {
    pub order_uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

/// Error envelope the backend uses for failed requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
