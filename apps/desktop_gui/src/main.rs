use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{DashboardApp, StartupConfig};

#[derive(Debug, Parser)]
#[command(name = "catalog-gui", about = "Desktop window for the food catalog")]
struct Args {
    /// Base URL of the catalog server.
    #[arg(long, env = "CATALOG_SERVER_URL", default_value = shared::protocol::DEFAULT_BASE_URL)]
    server_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(args.server_url.clone(), cmd_rx, ui_tx);

    let startup = StartupConfig {
        server_url: args.server_url,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Food Catalog")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([560.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Food Catalog",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(cmd_tx, ui_rx, startup)))),
    )
}
