use crate::error::{ConvertError, Result};
use derivative::Derivative;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::policy::{mime_for_extension, MAX_FILE_SIZE};

/// Where the content of a candidate lives before it is selected.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(#[derivative(Debug = "ignore")] Arc<[u8]>),
}

/// A file offered by the picker or a drop, not yet validated.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub source: FileSource,
}

impl FileCandidate {
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let size = std::fs::metadata(path)
            .map_err(|e| ConvertError::io("Failed to read file", e))?
            .len();

        Ok(Self {
            mime: mime_for_name(&name).to_string(),
            name,
            size,
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, mime: impl Into<String>, bytes: Arc<[u8]>) -> Self {
        let name = name.into();
        let mut mime = mime.into();
        if mime.is_empty() {
            mime = mime_for_name(&name).to_string();
        }
        Self {
            size: bytes.len() as u64,
            name,
            mime,
            source: FileSource::Bytes(bytes),
        }
    }

    /// Loads the content. Only called once the candidate passed validation.
    ///
    /// Reads from disk are capped one byte past [`MAX_FILE_SIZE`]; the
    /// declared size may be stale (file grew, special files report 0).
    pub fn load(self) -> Result<SelectedFile> {
        let content: Arc<[u8]> = match self.source {
            FileSource::Bytes(bytes) => bytes,
            FileSource::Path(path) => read_capped(&path)?.into(),
        };
        if content.len() as u64 > MAX_FILE_SIZE {
            return Err(ConvertError::FileTooLarge {
                name: self.name,
                size: content.len() as u64,
            });
        }

        Ok(SelectedFile {
            name: self.name,
            size: content.len() as u64,
            mime: self.mime,
            content,
        })
    }
}

/// The file currently held by the widget.
#[derive(Derivative, Clone, PartialEq)]
#[derivative(Debug)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub mime: String,
    #[derivative(Debug = "ignore")]
    pub content: Arc<[u8]>,
}

/// Result of one conversion, sent from the worker thread back to the UI.
#[derive(Debug)]
pub enum ConversionOutcome {
    Saved(PathBuf),
    Failed(ConvertError),
}

fn read_capped(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| ConvertError::io("Failed to read file", e))?;
    let mut content = Vec::new();
    file.take(MAX_FILE_SIZE + 1)
        .read_to_end(&mut content)
        .map_err(|e| ConvertError::io("Failed to read file", e))?;
    Ok(content)
}

fn mime_for_name(name: &str) -> &'static str {
    name.rsplit_once('.')
        .map(|(_, ext)| mime_for_extension(ext))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn candidate_from_path_reads_size_and_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Budget.XLSX");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&[1u8; 2048])
            .unwrap();

        let candidate = FileCandidate::from_path(&path).unwrap();
        assert_eq!(candidate.name, "Budget.XLSX");
        assert_eq!(candidate.size, 2048);
        assert_eq!(
            candidate.mime,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );

        let selected = candidate.load().unwrap();
        assert_eq!(selected.content.len(), 2048);
    }

    #[test]
    fn content_larger_than_declared_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grown.txt");
        std::fs::write(&path, vec![b'a'; (MAX_FILE_SIZE + 10) as usize]).unwrap();

        let candidate = FileCandidate {
            name: "grown.txt".into(),
            size: 4,
            mime: "text/plain".into(),
            source: FileSource::Path(path),
        };
        match candidate.load().unwrap_err() {
            ConvertError::FileTooLarge { size, .. } => assert_eq!(size, MAX_FILE_SIZE + 1),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn content_at_the_limit_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exact.txt");
        std::fs::write(&path, vec![b'a'; MAX_FILE_SIZE as usize]).unwrap();

        let selected = FileCandidate::from_path(&path).unwrap().load().unwrap();
        assert_eq!(selected.size, MAX_FILE_SIZE);
    }

    #[test]
    fn missing_path_is_an_io_error() {
        let err = FileCandidate::from_path(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
    }

    #[test]
    fn unknown_extension_has_empty_mime() {
        let candidate = FileCandidate::from_bytes("setup.exe", "", Arc::from(vec![0u8; 4]));
        assert_eq!(candidate.mime, "");
        assert_eq!(candidate.size, 4);
    }

    #[test]
    fn debug_output_skips_content() {
        let selected = FileCandidate::from_bytes("notes.txt", "text/plain", Arc::from(vec![7u8; 64]))
            .load()
            .unwrap();
        let debug = format!("{:?}", selected);
        assert!(debug.contains("notes.txt"));
        assert!(!debug.contains("content"));
    }
}
