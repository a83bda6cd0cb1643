//! Scanner configuration
//!
//! Resolution order: built-in defaults, then a TOML file, then environment
//! overrides, then whatever the caller applies with the `with_*` builders.

use crate::error::ConfigError;
use crate::platform::BarcodeType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default analysis service location
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8095";

/// Delay before a failed scan unlocks the camera again
pub const DEFAULT_UNLOCK_DELAY_MS: u64 = 2000;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the service base URL
pub const ENV_API_URL: &str = "SHELFSCAN_API_URL";

/// Environment variable overriding the request timeout
pub const ENV_TIMEOUT_SECS: &str = "SHELFSCAN_TIMEOUT_SECS";

/// Scanner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Base URL of the analysis service, `/analyze` is appended
    pub api_base_url: String,
    /// Request timeout; expiry counts as an analysis failure
    pub request_timeout_secs: u64,
    /// Auto-unlock delay after a failed analysis
    pub unlock_delay_ms: u64,
    /// Symbologies accepted from the camera
    pub barcode_types: Vec<BarcodeType>,
    /// Optional user profile file (JSON or TOML)
    pub profile_path: Option<PathBuf>,
}

impl ScanConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML file; absent keys keep their defaults
    ///
    /// # Errors
    /// Fails when the file cannot be read or parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Returns the parser message on malformed input.
    pub fn from_toml_str(raw: &str) -> Result<Self, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }

    /// Apply `SHELFSCAN_*` environment overrides
    ///
    /// # Errors
    /// Fails when an override is present but unparsable.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup
    ///
    /// # Errors
    /// Fails when an override is present but unparsable.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(ENV_API_URL) {
            tracing::debug!("{} overrides api_base_url", ENV_API_URL);
            self.api_base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{ENV_TIMEOUT_SECS} is not a number: {raw}"))
            })?;
        }
        Ok(self)
    }

    /// With service base URL
    #[inline]
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// With auto-unlock delay
    #[inline]
    #[must_use]
    pub fn with_unlock_delay_ms(mut self, millis: u64) -> Self {
        self.unlock_delay_ms = millis;
        self
    }

    /// With profile file
    #[inline]
    #[must_use]
    pub fn with_profile_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.profile_path = Some(path.into());
        self
    }

    /// Request timeout as a duration
    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Auto-unlock delay as a duration
    #[inline]
    #[must_use]
    pub fn unlock_delay(&self) -> Duration {
        Duration::from_millis(self.unlock_delay_ms)
    }

    /// Full URL of the analyze endpoint
    #[must_use]
    pub fn analyze_url(&self) -> String {
        format!("{}/analyze", self.api_base_url.trim_end_matches('/'))
    }

    /// Whether the camera should report this symbology
    #[must_use]
    pub fn accepts(&self, barcode_type: &str) -> bool {
        self.barcode_types.iter().any(|t| t.as_str() == barcode_type)
    }

    /// Check ranges
    ///
    /// # Errors
    /// Returns the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api_base_url must be an http(s) URL, got {:?}",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.barcode_types.is_empty() {
            return Err(ConfigError::Invalid(
                "barcode_types must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            unlock_delay_ms: DEFAULT_UNLOCK_DELAY_MS,
            barcode_types: BarcodeType::ALL.to_vec(),
            profile_path: None,
        }
    }
}
