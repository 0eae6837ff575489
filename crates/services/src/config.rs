use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::sources::SourceKind;

pub const SOURCE_VAR: &str = "QUIZ_SOURCE";
pub const ENDPOINT_VAR: &str = "QUIZ_ENDPOINT";
pub const TIMEOUT_VAR: &str = "QUIZ_FETCH_TIMEOUT_SECS";
pub const FALLBACK_VAR: &str = "QUIZ_FALLBACK_STATIC";

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how long to wait for the remote question list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteSourceConfig {
    pub endpoint: Url,
    pub timeout: Duration,
}

impl RemoteSourceConfig {
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SourceConfig {
    #[default]
    Static,
    Remote(RemoteSourceConfig),
}

impl SourceConfig {
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        match self {
            SourceConfig::Static => SourceKind::Static,
            SourceConfig::Remote(_) => SourceKind::Remote,
        }
    }
}

/// Selects the question source for a quiz run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    pub source: SourceConfig,
    /// Load the built-in questions when the remote fetch fails.
    pub fallback_to_static: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::Static,
            fallback_to_static: true,
        }
    }
}

impl QuizConfig {
    /// Read configuration from `QUIZ_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is present but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a value is present but unusable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let kind = match get(SOURCE_VAR) {
            Some(raw) => raw.parse::<SourceKind>()?,
            None => SourceKind::Static,
        };

        let fallback_to_static = match get(FALLBACK_VAR) {
            Some(raw) => parse_flag(FALLBACK_VAR, &raw)?,
            None => true,
        };

        let source = match kind {
            SourceKind::Static => SourceConfig::Static,
            SourceKind::Remote => {
                let endpoint = get(ENDPOINT_VAR).ok_or(ConfigError::MissingEndpoint)?;
                let timeout = match get(TIMEOUT_VAR) {
                    Some(raw) => parse_timeout_secs(&raw)?,
                    None => DEFAULT_FETCH_TIMEOUT,
                };
                SourceConfig::Remote(
                    RemoteSourceConfig::new(parse_endpoint(&endpoint)?).with_timeout(timeout),
                )
            }
        };

        Ok(Self {
            source,
            fallback_to_static,
        })
    }
}

/// Parse an absolute endpoint URL.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEndpoint` if `raw` is not a valid URL.
pub fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidEndpoint {
        raw: raw.to_string(),
        source,
    })
}

/// Parse a whole number of seconds greater than zero.
///
/// # Errors
///
/// Returns `ConfigError::InvalidTimeout` for zero or non-numeric input.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            raw: raw.to_string(),
        }),
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            raw: raw.to_string(),
        }),
    }
}
