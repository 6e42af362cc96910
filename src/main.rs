use anyhow::{Context, Result};
use clap::Parser;
use eframe::CreationContext;
use pdf_converter_client::{AppConfig, HttpConverter, UploadWidget};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = AppConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let converter = HttpConverter::new(&config.server_url, config.timeout())
        .context("Failed to build HTTP client")?;
    let mut widget = UploadWidget::new(converter, config.resolved_download_dir())
        .with_open_after_download(config.open_after_download);
    widget.probe_server_health();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([520.0, 480.0])
            .with_min_inner_size([400.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Document to PDF Converter",
        options,
        Box::new(move |_cc: &CreationContext| Box::new(widget)),
    )
    .map_err(|e| anyhow::anyhow!("UI failed: {}", e))
}
