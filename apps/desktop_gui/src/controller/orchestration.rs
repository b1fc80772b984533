//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Returns whether the command was accepted; callers must not leave
/// in-flight state behind for a command that was never queued.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = match &cmd {
        BackendCommand::FetchOrder { .. } => "fetch_order",
        BackendCommand::LoadAllOrders => "load_all_orders",
        BackendCommand::GenerateOrder => "generate_order",
        BackendCommand::StartAutoRefresh { .. } => "start_auto_refresh",
        BackendCommand::StopAutoRefresh => "stop_auto_refresh",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "command queue full, dropping command");
            *status = "Command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::warn!(command = cmd_name, "backend worker disconnected");
            *status = "Backend worker disconnected (possible startup failure); restart the app"
                .to_string();
            false
        }
    }
}
