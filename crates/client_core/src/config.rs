use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;
use shared::protocol::DEFAULT_UPLOAD_URL;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "caption.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub upload_url: String,
    /// Zero disables the timeout.
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            upload_url: DEFAULT_UPLOAD_URL.into(),
            request_timeout_secs: 120,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Defaults, then `caption.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<ClientSettings>(&raw) {
            Ok(file_cfg) => settings = file_cfg,
            Err(err) => warn!("ignoring unreadable settings file '{}': {err}", path.display()),
        }
    }

    if let Some(v) = env("CAPTION_UPLOAD_URL") {
        settings.upload_url = v;
    }
    if let Some(v) = env("APP__UPLOAD_URL") {
        settings.upload_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(_) => warn!("ignoring non-numeric APP__REQUEST_TIMEOUT_SECS '{v}'"),
        }
    }

    settings
}

pub fn parse_upload_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid upload url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("upload url '{raw}' must use http or https");
    }
    Ok(url)
}
