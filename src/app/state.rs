use crate::upload::{ConversionOutcome, SelectedFile};
use crate::utils::file_size::FileSizeUtils;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

/// Which panel the widget shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    FileSelected,
    Converting,
    Success { saved_to: PathBuf },
    Error(String),
}

impl UiState {
    pub fn name(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::FileSelected => "file_selected",
            UiState::Converting => "converting",
            UiState::Success { .. } => "success",
            UiState::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServerHealth {
    Unknown,
    Online,
    Unreachable,
}

impl Default for ServerHealth {
    fn default() -> Self {
        Self::Unknown
    }
}

#[derive(Default)]
pub struct UploadState {
    pub ui: UiState,
    pub selected: Option<SelectedFile>,
    pub drag_hover: bool,
    pub server_health: ServerHealth,
    pub outcome_receiver: Option<Receiver<ConversionOutcome>>,
    pub health_receiver: Option<Receiver<bool>>,
}

impl UploadState {
    /// Back to Idle. Server health is not part of the upload flow and survives.
    pub fn clear(&mut self) {
        let server_health = std::mem::take(&mut self.server_health);
        let health_receiver = self.health_receiver.take();
        *self = UploadState {
            server_health,
            health_receiver,
            ..UploadState::default()
        };
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.ui {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn file_size_text(&self) -> Option<String> {
        self.selected
            .as_ref()
            .map(|f| FileSizeUtils::format_size(f.size))
    }

    pub fn file_name(&self) -> Option<&str> {
        self.selected.as_ref().map(|f| f.name.as_str())
    }
}
