use crate::error::{ConvertError, Result, CONVERSION_FAILED_MESSAGE};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::types::SelectedFile;

/// Something that turns an uploaded document into PDF bytes.
pub trait Converter: Send + Sync + 'static {
    fn convert(&self, file: &SelectedFile) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Deserialize)]
struct HealthBody {
    status: String,
}

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Talks to the conversion server over HTTP.
#[derive(Clone)]
pub struct HttpConverter {
    base_url: String,
    client: reqwest::Client,
}

impl HttpConverter {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn convert_url(&self) -> String {
        format!("{}/convert", self.base_url)
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    /// Probes `GET /health`. Any failure, including no answer within
    /// [`HEALTH_TIMEOUT`], counts as unhealthy.
    pub async fn check_health(&self) -> bool {
        let request = self.client.get(self.health_url()).timeout(HEALTH_TIMEOUT);
        match request.send().await {
            Ok(res) if res.status().is_success() => match res.json::<HealthBody>().await {
                Ok(body) => body.status == "healthy",
                Err(e) => {
                    warn!("Unexpected health response: {}", e);
                    false
                }
            },
            Ok(res) => {
                warn!("Health check returned status {}", res.status());
                false
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                false
            }
        }
    }

    async fn post_file(&self, file: &SelectedFile) -> Result<Vec<u8>> {
        let mut part = Part::bytes(file.content.to_vec()).file_name(file.name.clone());
        if !file.mime.is_empty() {
            part = part.mime_str(&file.mime)?;
        }
        let form = Form::new().part("file", part);

        info!(file = %file.name, size = file.size, url = %self.convert_url(), "Uploading for conversion");
        let response = self
            .client
            .post(self.convert_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = server_error_message(&response.bytes().await.unwrap_or_default());
            warn!(status = status.as_u16(), "Conversion rejected: {}", message);
            return Err(ConvertError::ServerConversion {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        debug!(len = bytes.len(), "Received converted document");
        Ok(bytes.to_vec())
    }
}

impl Converter for HttpConverter {
    fn convert(&self, file: &SelectedFile) -> impl Future<Output = Result<Vec<u8>>> + Send {
        self.post_file(file)
    }
}

/// Extracts the `error` field of a JSON error body, falling back to a
/// generic message when it is missing, empty or the body is not JSON.
pub fn server_error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| CONVERSION_FAILED_MESSAGE.to_string())
}
