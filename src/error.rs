//! Errors surfaced to the user by the upload widget.
//!
//! Every variant ends up as the text of the error panel, so the `Display`
//! output is the user-facing message.

use thiserror::Error;

pub const INVALID_TYPE_MESSAGE: &str = "Please select a valid Excel (.xlsx, .xls, .xlsm), PowerPoint (.pptx, .ppt), Word (.docx, .doc), or Text (.txt) file";
pub const TOO_LARGE_MESSAGE: &str = "File size must be less than 16MB";
pub const CONVERSION_FAILED_MESSAGE: &str = "Conversion failed";

#[derive(Debug, Error)]
pub enum ConvertError {
    /// Neither the MIME type nor the extension is accepted.
    #[error("{}", INVALID_TYPE_MESSAGE)]
    InvalidFileType { name: String },

    /// Larger than the 16 MiB threshold.
    #[error("{}", TOO_LARGE_MESSAGE)]
    FileTooLarge { name: String, size: u64 },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    ServerConversion { status: u16, message: String },

    /// The request never completed or the response could not be handled.
    #[error("{0}")]
    Transport(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// True for errors raised before any network call was made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConvertError::InvalidFileType { .. } | ConvertError::FileTooLarge { .. }
        )
    }
}

impl From<reqwest::Error> for ConvertError {
    fn from(e: reqwest::Error) -> Self {
        ConvertError::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
