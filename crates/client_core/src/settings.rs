use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::{debug, warn};

/// Compiled-in backend origin; override at build time with `ELEVATECV_API_BASE_URL`.
pub const DEFAULT_API_BASE_URL: &str = match option_env!("ELEVATECV_API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

pub const SETTINGS_FILE_NAME: &str = "client.toml";

pub const ENV_API_BASE_URL: &str = "ELEVATECV_API_BASE_URL";
pub const ENV_MAX_UPLOAD_BYTES: &str = "ELEVATECV_MAX_UPLOAD_BYTES";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "ELEVATECV_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    /// Enforced upload ceiling; `None` leaves the advertised 5MB as guidance only.
    pub max_upload_bytes: Option<u64>,
    /// Whole-request timeout; `None` keeps the HTTP client's default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            max_upload_bytes: None,
            request_timeout_secs: None,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    api_base_url: Option<String>,
    max_upload_bytes: Option<u64>,
    request_timeout_secs: Option<u64>,
}

/// `<config dir>/elevatecv/client.toml`, when the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("elevatecv").join(SETTINGS_FILE_NAME))
}

/// Defaults, then the settings file, then environment variables. Unreadable or
/// malformed sources are logged and skipped.
///
/// Settings are read once at startup; the base URL stays fixed for the lifetime
/// of the running app and is never changed from the UI.
pub fn load_settings(explicit_path: Option<&Path>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    let path = explicit_path
        .map(Path::to_path_buf)
        .or_else(default_settings_path);
    if let Some(path) = path {
        match fs::read_to_string(&path) {
            Ok(raw) => {
                if let Err(err) = apply_file_overrides(&mut settings, &raw) {
                    warn!(path = %path.display(), %err, "ignoring malformed settings file");
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound && explicit_path.is_none() => {
                debug!(path = %path.display(), "no settings file");
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to read settings file");
            }
        }
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

pub fn apply_file_overrides(
    settings: &mut ClientSettings,
    raw: &str,
) -> Result<(), toml::de::Error> {
    let file: SettingsFile = toml::from_str(raw)?;
    if let Some(url) = file.api_base_url.filter(|url| !url.trim().is_empty()) {
        settings.api_base_url = url;
    }
    if let Some(limit) = file.max_upload_bytes {
        settings.max_upload_bytes = (limit > 0).then_some(limit);
    }
    if let Some(secs) = file.request_timeout_secs {
        settings.request_timeout_secs = (secs > 0).then_some(secs);
    }
    Ok(())
}

/// A value of `0` for the numeric settings switches the feature off.
pub fn apply_env_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    let read = |name: &str| {
        lookup(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    if let Some(url) = read(ENV_API_BASE_URL) {
        settings.api_base_url = url;
    }
    if let Some(limit) = read(ENV_MAX_UPLOAD_BYTES) {
        match limit.parse::<u64>() {
            Ok(limit) => settings.max_upload_bytes = (limit > 0).then_some(limit),
            Err(err) => warn!(var = ENV_MAX_UPLOAD_BYTES, %err, "ignoring invalid value"),
        }
    }
    if let Some(secs) = read(ENV_REQUEST_TIMEOUT_SECS) {
        match secs.parse::<u64>() {
            Ok(secs) => settings.request_timeout_secs = (secs > 0).then_some(secs),
            Err(err) => warn!(var = ENV_REQUEST_TIMEOUT_SECS, %err, "ignoring invalid value"),
        }
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
