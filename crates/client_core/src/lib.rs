use std::{fs, path::Path};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use serde_json::Value;
use shared::{
    domain::SelectedFile,
    error::UploadFailure,
    protocol::{ServiceErrorBody, UploadResult, IMAGE_FIELD_NAME},
};
use tracing::{debug, info};
use url::Url;

pub mod config;
pub mod form;

pub use config::{load_settings, parse_upload_url, ClientSettings};

/// Longest slice of an unstructured error body kept in failure details.
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Remote side of an upload attempt.
#[async_trait]
pub trait CaptionService: Send + Sync {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadResult, UploadFailure>;
}

/// Posts the selected image as multipart form data to the captioning service.
pub struct HttpCaptionService {
    http: Client,
    upload_url: Url,
}

impl HttpCaptionService {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let upload_url = parse_upload_url(&settings.upload_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build http client")?;
        Ok(Self { http, upload_url })
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }
}

#[async_trait]
impl CaptionService for HttpCaptionService {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadResult, UploadFailure> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())
            .map_err(|err| {
                UploadFailure::unexpected(format!(
                    "invalid mime type '{}': {err}",
                    file.mime_type()
                ))
            })?;
        let form = Form::new().part(IMAGE_FIELD_NAME, part);

        info!(
            file = file.name(),
            bytes = file.len(),
            url = %self.upload_url,
            "uploading image"
        );
        let response = self
            .http
            .post(self.upload_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|err| UploadFailure::transport(format!("request failed: {err}")))?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) if status.is_success() => {
                return Err(UploadFailure::unexpected(format!(
                    "failed to read response body: {err}"
                )));
            }
            Err(_) => String::new(),
        };
        debug!(status = status.as_u16(), bytes = body.len(), "caption service replied");

        classify_response(status, &body)
    }
}

/// Maps a finished HTTP exchange onto the form's outcome categories.
pub fn classify_response(status: StatusCode, body: &str) -> Result<UploadResult, UploadFailure> {
    if !status.is_success() {
        let reason = match ServiceErrorBody::parse(body) {
            Some(service_error) => service_error.error,
            None => body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect(),
        };
        return Err(UploadFailure::transport(format!("http {status}: {reason}")));
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|err| UploadFailure::unexpected(format!("response body is not json: {err}")))?;
    if value.is_null() {
        return Err(UploadFailure::unexpected("response body is json null"));
    }

    Ok(UploadResult {
        captions: required_list(&value, "captions")?,
        songs: required_list(&value, "songs")?,
    })
}

fn required_list(value: &Value, key: &str) -> Result<Vec<String>, UploadFailure> {
    match value.get(key) {
        None | Some(Value::Null) => Err(UploadFailure::malformed(format!(
            "response is missing `{key}`"
        ))),
        Some(field) => serde_json::from_value(field.clone()).map_err(|err| {
            UploadFailure::malformed(format!("`{key}` is not a list of strings: {err}"))
        }),
    }
}

/// Reads an image from disk, guessing its MIME type from the extension.
pub fn load_selected_file(path: &Path) -> Result<SelectedFile> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read image '{}'", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    Ok(SelectedFile::new(name, mime_type, bytes))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
