mod backend_bridge;
mod controller;
mod ui;

use chrono::Local;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::SeatFinderApp;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:5000")]
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

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(args.server_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Vacant Seat Finder")
            .with_inner_size([760.0, 820.0])
            .with_min_inner_size([520.0, 480.0]),
        ..Default::default()
    };
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    eframe::run_native(
        "Vacant Seat Finder",
        options,
        Box::new(|_cc| Ok(Box::new(SeatFinderApp::new(cmd_tx, ui_rx, today)))),
    )
}
