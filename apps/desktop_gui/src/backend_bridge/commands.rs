//! Backend commands queued from UI to backend worker.

use std::time::Duration;

#[derive(Debug)]
pub enum BackendCommand {
    FetchOrder {
        uid: String,
    },
    LoadAllOrders,
    GenerateOrder,
    StartAutoRefresh {
        every: Duration,
    },
    StopAutoRefresh,
}
