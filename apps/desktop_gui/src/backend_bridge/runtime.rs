//! Backend worker: owns the tokio runtime, the HTTP client, and the
//! auto-refresh interval task.

use std::thread;

use anyhow::Context as _;
use client_core::{OrdersApi, OrdersClient};
use crossbeam_channel::{Receiver, Sender};
use tokio::{runtime::Runtime, task::JoinHandle};
use tracing::{error, info};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let (runtime, client) = match boot(&server_url) {
            Ok(parts) => parts,
            Err(err) => {
                error!("backend worker startup failure: {err:#}");
                let _ = ui_tx.try_send(UiEvent::OrdersLoadFailed(format!(
                    "Backend worker startup failure: {err:#}"
                )));
                return;
            }
        };
        runtime.block_on(run_worker(client, cmd_rx, ui_tx));
    });
}

fn boot(server_url: &str) -> anyhow::Result<(Runtime, OrdersClient)> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build backend runtime")?;
    let client = OrdersClient::new(server_url)
        .with_context(|| format!("failed to construct client for '{server_url}'"))?;
    Ok((runtime, client))
}

async fn run_worker<A>(api: A, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>)
where
    A: OrdersApi + Clone + 'static,
{
    let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

    // At most one interval task is alive at any time: stopped on toggle-off
    // and aborted before a restart.
    let mut refresh_task: Option<JoinHandle<()>> = None;

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::FetchOrder { uid } => {
                info!(%uid, "backend: fetch_order");
                let event = match api.fetch_order(&uid).await {
                    Ok(order) => UiEvent::OrderLoaded(Box::new(order)),
                    Err(err) => {
                        error!(%uid, "backend: fetch_order failed: {err}");
                        UiEvent::OrderLookupFailed(err.to_string())
                    }
                };
                let _ = ui_tx.try_send(event);
            }
            BackendCommand::LoadAllOrders => {
                info!("backend: load_all_orders");
                let _ = ui_tx.try_send(load_orders_event(&api).await);
            }
            BackendCommand::GenerateOrder => {
                info!("backend: generate_order");
                let event = match api.generate_order().await {
                    Ok(generated) => UiEvent::OrderGenerated {
                        order_uid: generated.order_uid,
                        order: generated.order.map(Box::new),
                    },
                    Err(err) => {
                        error!("backend: generate_order failed: {err}");
                        UiEvent::OrderGenerationFailed(err.to_string())
                    }
                };
                let _ = ui_tx.try_send(event);
            }
            BackendCommand::StartAutoRefresh { every } => {
                info!(interval_secs = every.as_secs_f64(), "backend: start_auto_refresh");
                if let Some(task) = refresh_task.take() {
                    task.abort();
                }
                let api = api.clone();
                let ui_tx = ui_tx.clone();
                refresh_task = Some(tokio::spawn(async move {
                    let mut ticker = tokio::time::interval(every);
                    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
                    // The first tick of `interval` completes immediately; the
                    // first refresh should happen one full period after enable.
                    ticker.tick().await;
                    loop {
                        ticker.tick().await;
                        let _ = ui_tx.try_send(load_orders_event(&api).await);
                    }
                }));
            }
            BackendCommand::StopAutoRefresh => {
                info!("backend: stop_auto_refresh");
                if let Some(task) = refresh_task.take() {
                    task.abort();
                }
            }
        }
    }

    if let Some(task) = refresh_task.take() {
        task.abort();
    }
}

async fn load_orders_event<A: OrdersApi>(api: &A) -> UiEvent {
    match api.list_orders().await {
        Ok(orders) => UiEvent::OrdersLoaded(orders),
        Err(err) => {
            error!("backend: load_all_orders failed: {err}");
            UiEvent::OrdersLoadFailed(err.to_string())
        }
    }
}

#[cfg(test)]
fn spawn_worker_for_tests<A>(api: A, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>)
where
    A: OrdersApi + Clone + 'static,
{
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("test runtime");
        runtime.block_on(run_worker(api, cmd_rx, ui_tx));
    });
}
