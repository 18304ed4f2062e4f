#![cfg_attr(windows, windows_subsystem = "windows")]

use anyhow::anyhow;
use anyhow::Result;
use eframe::egui;
use egui::IconData;
use tracing::{info, warn};

mod app;
mod controller;
mod dialogs;
mod encoding;
mod error;
mod logging;
mod models;
mod utils;

use app::QrGeneratorApp;

fn window_icon() -> Option<IconData> {
    match encoding::generate_plain("QR") {
        Ok(image) => Some(IconData {
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
        }),
        Err(e) => {
            warn!(error = %e, "could not render window icon");
            None
        }
    }
}

fn main() -> Result<()> {
    logging::init(logging::DEFAULT_LEVEL)?;
    info!("starting QR Code Generator");

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([520.0, 660.0]);
    if let Some(icon) = window_icon() {
        viewport = viewport.with_icon(icon);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "QR Code Generator",
        options,
        Box::new(|_| Box::new(QrGeneratorApp::new())),
    )
    .map_err(|e| anyhow!("Application error: {}", e))
}
