use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_settings, ReviewClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{ReviewApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "elevatecv-gui", about = "ElevateCV desktop resume review")]
struct Args {
    /// Settings file; defaults to <config dir>/elevatecv/client.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_base_url: Option<String>,
    /// Reject larger files before uploading. 0 disables the check.
    #[arg(long)]
    max_upload_bytes: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref());
    if let Some(url) = args.api_base_url {
        settings.api_base_url = url;
    }
    if let Some(limit) = args.max_upload_bytes {
        settings.max_upload_bytes = (limit > 0).then_some(limit);
    }
    let client = ReviewClient::from_settings(&settings).context("invalid client settings")?;
    let startup = StartupConfig {
        api_base_url: client.base_url().to_string(),
        max_upload_bytes: settings.max_upload_bytes,
    };
    tracing::info!(base_url = %startup.api_base_url, "starting desktop client");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, client);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("ElevateCV")
            .with_inner_size([860.0, 720.0])
            .with_min_inner_size([520.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "ElevateCV",
        options,
        Box::new(|_cc| Ok(Box::new(ReviewApp::new(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop UI exited with error: {err}"))
}
