use crate::error::{ConvertError, Result};

use super::types::FileCandidate;

pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Accepted extensions and the MIME type each one maps to.
pub const ACCEPTED_TYPES: &[(&str, &str)] = &[
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("xls", "application/vnd.ms-excel"),
    ("xlsm", "application/vnd.ms-excel.sheet.macroEnabled.12"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("doc", "application/msword"),
    ("txt", "text/plain"),
];

/// Returns the MIME type for an accepted extension, or "" when unknown.
pub fn mime_for_extension(extension: &str) -> &'static str {
    let extension = extension.to_lowercase();
    ACCEPTED_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
        .unwrap_or("")
}

pub fn accepted_extensions() -> Vec<&'static str> {
    ACCEPTED_TYPES.iter().map(|(ext, _)| *ext).collect()
}

pub struct ValidationPolicy;

impl ValidationPolicy {
    /// A candidate passes when its MIME type OR its extension is accepted,
    /// and its size is at most [`MAX_FILE_SIZE`].
    pub fn validate(candidate: &FileCandidate) -> Result<()> {
        if !Self::is_accepted_mime(&candidate.mime) && !Self::is_accepted_name(&candidate.name) {
            return Err(ConvertError::InvalidFileType {
                name: candidate.name.clone(),
            });
        }

        if candidate.size > MAX_FILE_SIZE {
            return Err(ConvertError::FileTooLarge {
                name: candidate.name.clone(),
                size: candidate.size,
            });
        }

        Ok(())
    }

    pub fn is_accepted_mime(mime: &str) -> bool {
        ACCEPTED_TYPES.iter().any(|(_, accepted)| *accepted == mime)
    }

    pub fn is_accepted_name(name: &str) -> bool {
        match name.rsplit_once('.') {
            Some((_, ext)) => {
                let ext = ext.to_lowercase();
                ACCEPTED_TYPES.iter().any(|(accepted, _)| *accepted == ext)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::FileSource;
    use std::path::PathBuf;

    fn candidate(name: &str, mime: &str, size: u64) -> FileCandidate {
        FileCandidate {
            name: name.to_string(),
            size,
            mime: mime.to_string(),
            source: FileSource::Path(PathBuf::from(name)),
        }
    }

    #[test]
    fn every_accepted_extension_passes_whatever_the_mime() {
        for ext in accepted_extensions() {
            for mime in ["", "application/octet-stream", "image/png"] {
                let c = candidate(&format!("file.{}", ext), mime, 10);
                assert!(ValidationPolicy::validate(&c).is_ok(), "{} / {}", ext, mime);
            }
        }
    }

    #[test]
    fn extension_check_ignores_case() {
        assert!(ValidationPolicy::validate(&candidate("REPORT.XlSx", "", 1)).is_ok());
    }

    #[test]
    fn accepted_mime_rescues_unknown_extension() {
        let c = candidate("notes.weird", "text/plain", 1);
        assert!(ValidationPolicy::validate(&c).is_ok());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let c = candidate("malware.exe", "application/x-msdownload", 1);
        let err = ValidationPolicy::validate(&c).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidFileType { .. }));
        assert!(err.to_string().contains("valid Excel"));

        let c = candidate("README", "", 1);
        assert!(ValidationPolicy::validate(&c).is_err());
    }

    #[test]
    fn size_limit_is_inclusive() {
        let c = candidate("big.xlsx", "", MAX_FILE_SIZE);
        assert!(ValidationPolicy::validate(&c).is_ok());

        for size in [MAX_FILE_SIZE + 1, MAX_FILE_SIZE * 2, u64::MAX] {
            let c = candidate(
                "big.xlsx",
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                size,
            );
            assert!(matches!(
                ValidationPolicy::validate(&c),
                Err(ConvertError::FileTooLarge { .. })
            ));
        }
    }

    #[test]
    fn type_is_checked_before_size() {
        let c = candidate("huge.exe", "", MAX_FILE_SIZE + 1);
        assert!(matches!(
            ValidationPolicy::validate(&c),
            Err(ConvertError::InvalidFileType { .. })
        ));
    }

    #[test]
    fn mime_lookup() {
        assert_eq!(mime_for_extension("DOC"), "application/msword");
        assert_eq!(mime_for_extension("pdf"), "");
    }
}
