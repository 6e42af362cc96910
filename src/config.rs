//! Command line and environment configuration.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Parser)]
#[command(name = "pdf-converter", version, about = "Convert Office and text documents to PDF")]
pub struct AppConfig {
    /// Base URL of the conversion server.
    #[arg(long, env = "PDF_CONVERTER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Directory converted PDFs are saved into. Defaults to the system
    /// download folder.
    #[arg(long, env = "PDF_CONVERTER_DOWNLOAD_DIR")]
    pub download_dir: Option<PathBuf>,

    /// Give up on a conversion request after this many seconds.
    /// Without it a request may wait forever.
    #[arg(long, env = "PDF_CONVERTER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Open the PDF in the system viewer once it is saved.
    #[arg(long)]
    pub open_after_download: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            download_dir: None,
            timeout_secs: None,
            open_after_download: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }

    pub fn resolved_download_dir(&self) -> PathBuf {
        if let Some(dir) = &self.download_dir {
            return dir.clone();
        }

        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_server() {
        let config = AppConfig::try_parse_from(["pdf-converter"]).unwrap();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert!(config.timeout().is_none());
        assert!(!config.open_after_download);
    }

    #[test]
    fn parses_flags() {
        let config = AppConfig::try_parse_from([
            "pdf-converter",
            "--server-url",
            "http://10.0.0.2:8080",
            "--download-dir",
            "/tmp/out",
            "--timeout-secs",
            "30",
            "--open-after-download",
        ])
        .unwrap();
        assert_eq!(config.server_url, "http://10.0.0.2:8080");
        assert_eq!(config.resolved_download_dir(), PathBuf::from("/tmp/out"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert!(config.open_after_download);
    }

    #[test]
    fn download_dir_defaults_to_system_folder() {
        let config = AppConfig::default();
        let expected = dirs::download_dir().unwrap_or_else(|| PathBuf::from("."));
        assert_eq!(config.resolved_download_dir(), expected);
    }

    #[test]
    fn zero_timeout_means_none() {
        let config = AppConfig {
            timeout_secs: Some(0),
            ..AppConfig::default()
        };
        assert!(config.timeout().is_none());
    }
}
