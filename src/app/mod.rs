mod state;
mod ui;

use crate::error::ConvertError;
use crate::upload::{
    pdf_download_name, save_download, ConversionOutcome, Converter, FileCandidate, HttpConverter,
    SelectedFile, ValidationPolicy,
};
use eframe::{egui, App};
pub use state::{ServerHealth, UiState, UploadState};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self as std_mpsc, TryRecvError};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Single-file upload widget: select, validate, convert, save.
///
/// All state lives here; the converter and the download directory are
/// handed in once at construction.
pub struct UploadWidget<C: Converter> {
    converter: Arc<C>,
    download_dir: PathBuf,
    open_after_download: bool,
    state: UploadState,
}

impl<C: Converter> UploadWidget<C> {
    pub fn new(converter: C, download_dir: PathBuf) -> Self {
        info!(download_dir = %download_dir.display(), "Initializing PDF converter");
        Self {
            converter: Arc::new(converter),
            download_dir,
            open_after_download: false,
            state: UploadState::default(),
        }
    }

    pub fn with_open_after_download(mut self, open: bool) -> Self {
        self.open_after_download = open;
        self
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn ui_state(&self) -> &UiState {
        &self.state.ui
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.state.selected.as_ref()
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Validates and stores a candidate. On rejection the previous selection
    /// is left untouched and the error panel is shown.
    pub fn select_file(&mut self, candidate: FileCandidate) {
        if self.state.ui == UiState::Converting {
            warn!(file = %candidate.name, "Ignoring selection while a conversion is running");
            return;
        }

        debug!(file = %candidate.name, size = candidate.size, mime = %candidate.mime, "File offered");
        match ValidationPolicy::validate(&candidate).and_then(|_| candidate.load()) {
            Ok(file) => {
                info!(file = %file.name, size = file.size, "File selected");
                self.state.selected = Some(file);
                self.state.ui = UiState::FileSelected;
            }
            Err(e) => self.show_error(e),
        }
    }

    pub fn select_path(&mut self, path: &Path) {
        match FileCandidate::from_path(path) {
            Ok(candidate) => self.select_file(candidate),
            Err(e) => self.show_error(e),
        }
    }

    /// Back to Idle. A conversion still running is abandoned and its result
    /// discarded when it arrives.
    pub fn reset(&mut self) {
        if self.state.ui != UiState::Idle {
            info!("Resetting upload state");
        }
        self.state.clear();
    }

    /// Starts converting the selected file. Ignored unless a file is selected
    /// and no conversion is running.
    pub fn convert(&mut self) {
        if self.state.ui != UiState::FileSelected {
            debug!(state = self.state.ui.name(), "Convert ignored");
            return;
        }
        let Some(file) = self.state.selected.clone() else {
            return;
        };

        self.state.ui = UiState::Converting;
        let (sender, receiver) = std_mpsc::channel();
        self.state.outcome_receiver = Some(receiver);

        let converter = Arc::clone(&self.converter);
        let download_dir = self.download_dir.clone();
        info!(file = %file.name, "Starting conversion");

        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(run_conversion(converter.as_ref(), &file, &download_dir)),
                Err(e) => ConversionOutcome::Failed(ConvertError::Transport(format!(
                    "Failed to start runtime: {}",
                    e
                ))),
            };
            // The receiver is gone if the user reset meanwhile.
            let _ = sender.send(outcome);
        });
    }

    /// Applies a finished conversion, if any. Returns true when the state
    /// changed.
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = &self.state.outcome_receiver else {
            return false;
        };

        let received = receiver.try_recv();
        match received {
            Ok(outcome) => {
                self.state.outcome_receiver = None;
                self.apply_outcome(outcome);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.state.outcome_receiver = None;
                self.show_error(ConvertError::Transport(
                    "Conversion stopped unexpectedly".to_string(),
                ));
                true
            }
        }
    }

    fn apply_outcome(&mut self, outcome: ConversionOutcome) {
        if self.state.ui != UiState::Converting {
            debug!("Dropping conversion result for a reset widget");
            return;
        }

        match outcome {
            ConversionOutcome::Saved(path) => {
                info!(path = %path.display(), "Conversion complete");
                if self.open_after_download {
                    if let Err(e) = open::that(&path) {
                        warn!("Failed to open {}: {}", path.display(), e);
                    }
                }
                self.state.ui = UiState::Success { saved_to: path };
            }
            ConversionOutcome::Failed(e) => self.show_error(e),
        }
    }

    fn show_error(&mut self, e: ConvertError) {
        let message = e.to_string();
        if e.is_validation() {
            warn!("Rejected file: {}", message);
        } else {
            error!("Conversion error: {}", message);
        }
        self.state.ui = UiState::Error(message);
    }

    fn poll_health(&mut self) {
        if let Some(receiver) = &self.state.health_receiver {
            if let Ok(healthy) = receiver.try_recv() {
                self.state.server_health = if healthy {
                    ServerHealth::Online
                } else {
                    ServerHealth::Unreachable
                };
                self.state.health_receiver = None;
            }
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        self.poll();
        self.poll_health();

        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        self.state.drag_hover = hovering;

        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(file) = dropped.first() {
            self.handle_drop(file);
        }

        if self.state.ui == UiState::Converting || self.state.health_receiver.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    pub fn handle_drop(&mut self, file: &egui::DroppedFile) {
        if !matches!(self.state.ui, UiState::Idle | UiState::Error(_)) {
            debug!("Drop ignored outside the upload panel");
            return;
        }
        match candidate_from_drop(file) {
            Some(Ok(candidate)) => self.select_file(candidate),
            Some(Err(e)) => self.show_error(e),
            None => debug!("Drop carried neither a path nor bytes"),
        }
    }
}

impl UploadWidget<HttpConverter> {
    /// Probes the server's health endpoint in the background.
    pub fn probe_server_health(&mut self) {
        let converter = Arc::clone(&self.converter);
        let (sender, receiver) = std_mpsc::channel();
        self.state.health_receiver = Some(receiver);

        std::thread::spawn(move || {
            let healthy = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(converter.check_health()),
                Err(e) => {
                    warn!("Failed to start runtime for health check: {}", e);
                    false
                }
            };
            info!(healthy, "Server health checked");
            let _ = sender.send(healthy);
        });
    }
}

async fn run_conversion<C: Converter>(
    converter: &C,
    file: &SelectedFile,
    download_dir: &Path,
) -> ConversionOutcome {
    let result = async {
        let pdf = converter.convert(file).await?;
        save_download(download_dir, &pdf_download_name(&file.name), &pdf)
    }
    .await;

    match result {
        Ok(path) => ConversionOutcome::Saved(path),
        Err(e) => ConversionOutcome::Failed(e),
    }
}

fn candidate_from_drop(
    file: &egui::DroppedFile,
) -> Option<Result<FileCandidate, ConvertError>> {
    if let Some(path) = &file.path {
        return Some(FileCandidate::from_path(path));
    }
    file.bytes.as_ref().map(|bytes| {
        Ok(FileCandidate::from_bytes(
            file.name.clone(),
            file.mime.clone(),
            bytes.clone(),
        ))
    })
}

impl<C: Converter> App for UploadWidget<C> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
