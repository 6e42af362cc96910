mod client;
mod download;
mod policy;
mod types;

pub use client::{server_error_message, Converter, HttpConverter};
pub use download::{pdf_download_name, save_download};
pub use policy::{accepted_extensions, mime_for_extension, ValidationPolicy, ACCEPTED_TYPES, MAX_FILE_SIZE};
pub use types::{ConversionOutcome, FileCandidate, FileSource, SelectedFile};
