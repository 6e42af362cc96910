//! Desktop client that uploads one Office or text document to a conversion
//! server and saves the PDF it returns.

pub mod app;
pub mod config;
pub mod error;
pub mod upload;
pub mod utils;

pub use app::{UiState, UploadWidget};
pub use config::AppConfig;
pub use error::ConvertError;
pub use upload::{Converter, FileCandidate, HttpConverter, SelectedFile};
