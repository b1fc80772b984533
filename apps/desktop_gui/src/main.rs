use std::time::Duration;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::OrderWatchApp;

#[derive(Debug, Parser)]
#[command(name = "order-watch", about = "Desktop client for the order tracking service")]
struct StartupConfig {
    /// Base URL of the order tracking backend.
    #[arg(long, default_value = "http://localhost:8080")]
    server_url: String,

    /// Seconds between list refreshes while auto-refresh is enabled.
    #[arg(long, default_value_t = 30)]
    refresh_interval_secs: u64,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let startup = StartupConfig::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(startup.server_url.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Order Watch")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([860.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Order Watch",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(OrderWatchApp::new(
                cmd_tx,
                ui_rx,
                startup.server_url,
                Duration::from_secs(startup.refresh_interval_secs),
            )))
        }),
    )
}
