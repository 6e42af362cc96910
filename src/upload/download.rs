use crate::error::{ConvertError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Name of the converted file: the final extension is replaced by `.pdf`.
///
/// An extension is a trailing `.` followed by at least one character that is
/// neither `.` nor `/`. Names without one just get `.pdf` appended.
pub fn pdf_download_name(original: &str) -> String {
    let stem = match original.rfind('.') {
        Some(idx) => {
            let ext = &original[idx + 1..];
            if !ext.is_empty() && !ext.contains('/') {
                &original[..idx]
            } else {
                original
            }
        }
        None => original,
    };
    format!("{}.pdf", stem)
}

/// Writes `bytes` into `dir` under `file_name`, never overwriting an
/// existing file. Returns the final path.
///
/// The content is staged in a temporary file in the same directory and
/// persisted in one step; the temporary file is deleted on any failure.
pub fn save_download(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|e| ConvertError::io(format!("Cannot create {}", dir.display()), e))?;

    let mut staged = NamedTempFile::new_in(dir)
        .map_err(|e| ConvertError::io("Failed to create download file", e))?;
    staged
        .write_all(bytes)
        .and_then(|_| staged.flush())
        .map_err(|e| ConvertError::io("Failed to write download", e))?;
    debug!(path = %staged.path().display(), len = bytes.len(), "download staged");

    let mut attempt = 0;
    loop {
        let target = dir.join(numbered_name(file_name, attempt));
        match staged.persist_noclobber(&target) {
            Ok(_) => {
                info!(path = %target.display(), "download saved");
                return Ok(target);
            }
            Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
                staged = e.file;
                attempt += 1;
            }
            Err(e) => return Err(ConvertError::io("Failed to save download", e.error)),
        }
    }
}

/// `report.pdf`, `report (1).pdf`, `report (2).pdf`, ...
fn numbered_name(file_name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return file_name.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{} ({}).{}", stem, attempt, ext),
        _ => format!("{} ({})", file_name, attempt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_final_extension() {
        assert_eq!(pdf_download_name("notes.txt"), "notes.pdf");
        assert_eq!(pdf_download_name("report.final.xlsx"), "report.final.pdf");
        assert_eq!(pdf_download_name("Deck.PPTX"), "Deck.pdf");
    }

    #[test]
    fn names_without_extension_get_one() {
        assert_eq!(pdf_download_name("Makefile"), "Makefile.pdf");
        assert_eq!(pdf_download_name("trailing."), "trailing..pdf");
    }

    #[test]
    fn saves_under_converted_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_download(dir.path(), "notes.pdf", b"%PDF-1.4").unwrap();
        assert_eq!(path, dir.path().join("notes.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn never_overwrites_existing_downloads() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.pdf"), b"old").unwrap();
        std::fs::write(dir.path().join("notes (1).pdf"), b"older").unwrap();

        let path = save_download(dir.path(), "notes.pdf", b"new").unwrap();
        assert_eq!(path, dir.path().join("notes (2).pdf"));
        assert_eq!(std::fs::read(dir.path().join("notes.pdf")).unwrap(), b"old");
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn leaves_no_staging_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        save_download(dir.path(), "a.pdf", b"x").unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn creates_missing_download_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = save_download(&nested, "x.pdf", b"1").unwrap();
        assert!(path.starts_with(&nested));
    }
}
