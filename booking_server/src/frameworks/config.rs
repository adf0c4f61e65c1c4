use serde::Deserialize;
use std::{env, fmt, time::Duration};
use url::Url;

use crate::use_cases::dispatch::{BaseUrlError, ExternalRedirect};

// Runtime/server settings. Optional TOML file first, then environment overrides.

pub const CONFIG_PATH_VAR: &str = "BOOKING_CONFIG";
pub const DEFAULT_RESERVATION_BASE_URL: &str = "https://booking.auralta.com/search";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    // Send the browser to the external reservation system.
    #[default]
    Redirect,
    // Keep the visitor on site; intents go to the overlay feed.
    Overlay,
}

impl DispatchMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redirect" => Some(DispatchMode::Redirect),
            "overlay" => Some(DispatchMode::Overlay),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub port: u16,
    pub reservation_base_url: String,
    pub dispatch_mode: DispatchMode,
    pub overlay_capacity: usize,
    // 0 disables the automatic alternation.
    pub destination_rotation_ms: u64,
    pub testimonial_rotation_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 3004,
            reservation_base_url: DEFAULT_RESERVATION_BASE_URL.to_string(),
            dispatch_mode: DispatchMode::Redirect,
            overlay_capacity: 64,
            destination_rotation_ms: 8_000,
            testimonial_rotation_ms: 6_000,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: String, source: std::io::Error },
    Parse { path: String, source: toml::de::Error },
    InvalidUrl { value: String, source: url::ParseError },
    UnsupportedUrl { value: String, source: BaseUrlError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => write!(f, "failed to read {path}: {source}"),
            ConfigError::Parse { path, source } => write!(f, "failed to parse {path}: {source}"),
            ConfigError::InvalidUrl { value, source } => {
                write!(f, "invalid reservation url `{value}`: {source}")
            }
            ConfigError::UnsupportedUrl { value, source } => write!(f, "`{value}`: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let file = match env::var(CONFIG_PATH_VAR) {
            Ok(path) => {
                let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                Some((path, contents))
            }
            Err(_) => None,
        };

        let file = file
            .as_ref()
            .map(|(path, contents)| (path.as_str(), contents.as_str()));
        Self::from_sources(file, |key| env::var(key).ok())
    }

    // Builds settings from an optional (path, toml) pair and an env lookup.
    pub fn from_sources<F>(file: Option<(&str, &str)>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match file {
            Some((path, contents)) => {
                toml::from_str::<Settings>(contents).map_err(|source| ConfigError::Parse {
                    path: path.to_string(),
                    source,
                })?
            }
            None => Settings::default(),
        };

        if let Some(port) = parsed(&lookup, "BOOKING_SERVER_PORT") {
            settings.port = port;
        }
        if let Some(url) = lookup("RESERVATION_BASE_URL") {
            settings.reservation_base_url = url;
        }
        if let Some(value) = lookup("DISPATCH_MODE") {
            match DispatchMode::parse(&value) {
                Some(mode) => settings.dispatch_mode = mode,
                None => tracing::warn!(%value, "ignoring unknown DISPATCH_MODE"),
            }
        }
        if let Some(ms) = parsed(&lookup, "DESTINATION_ROTATION_MS") {
            settings.destination_rotation_ms = ms;
        }
        if let Some(ms) = parsed(&lookup, "TESTIMONIAL_ROTATION_MS") {
            settings.testimonial_rotation_ms = ms;
        }

        // Fail at startup rather than on the first search.
        settings.external_redirect()?;
        Ok(settings)
    }

    pub fn external_redirect(&self) -> Result<ExternalRedirect, ConfigError> {
        let url = Url::parse(&self.reservation_base_url).map_err(|source| ConfigError::InvalidUrl {
            value: self.reservation_base_url.clone(),
            source,
        })?;
        ExternalRedirect::new(url).map_err(|source| ConfigError::UnsupportedUrl {
            value: self.reservation_base_url.clone(),
            source,
        })
    }

    pub fn destination_rotation(&self) -> Duration {
        Duration::from_millis(self.destination_rotation_ms)
    }

    pub fn testimonial_rotation(&self) -> Duration {
        Duration::from_millis(self.testimonial_rotation_ms)
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable setting");
            None
        }
    }
}
