//! Sectioned run configuration.
//!
//! Settings come from an INI file with `[ui]` and `[api]` sections. Lookups
//! are lazy: a missing section or key is reported by the first getter that
//! needs it, not at load time.

use crate::browser::BrowserSettings;
use crate::result::{ShopError, ShopResult};
use config::{Config, ConfigError, File, FileFormat};
use std::path::Path;
use std::time::Duration;

/// Section holding browser-side settings
pub const UI_SECTION: &str = "ui";

/// Section holding REST API settings
pub const API_SECTION: &str = "api";

/// Default poll interval for bounded waits
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Read-only key/value settings grouped into named sections.
#[derive(Debug, Clone)]
pub struct Settings {
    inner: Config,
}

impl Settings {
    /// Load settings from an INI file
    pub fn load(path: impl AsRef<Path>) -> ShopResult<Self> {
        let path = path.as_ref();
        let inner = Config::builder()
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Ini))
            .build()
            .map_err(|e| ShopError::ConfigLoad {
                message: format!("{}: {e}", path.display()),
            })?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(Self { inner })
    }

    /// Parse settings from INI text
    pub fn from_ini_str(text: &str) -> ShopResult<Self> {
        let inner = Config::builder()
            .add_source(File::from_str(text, FileFormat::Ini))
            .build()
            .map_err(|e| ShopError::ConfigLoad {
                message: e.to_string(),
            })?;
        Ok(Self { inner })
    }

    /// Get a string value
    pub fn get(&self, section: &str, key: &str) -> ShopResult<String> {
        self.inner
            .get_string(&path(section, key))
            .map_err(|e| lookup_error(section, key, e))
    }

    /// Get an integer value
    pub fn get_int(&self, section: &str, key: &str) -> ShopResult<i64> {
        self.inner
            .get_int(&path(section, key))
            .map_err(|e| lookup_error(section, key, e))
    }

    /// Get a string value, `None` when the key is absent
    pub fn get_opt(&self, section: &str, key: &str) -> ShopResult<Option<String>> {
        match self.get(section, key) {
            Ok(value) => Ok(Some(value)),
            Err(ShopError::MissingSectionOrKey { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get an integer value, falling back to `default` when absent
    pub fn get_int_or(&self, section: &str, key: &str, default: i64) -> ShopResult<i64> {
        match self.get_int(section, key) {
            Ok(value) => Ok(value),
            Err(ShopError::MissingSectionOrKey { .. }) => Ok(default),
            Err(e) => Err(e),
        }
    }

    /// Get a boolean value, falling back to `default` when absent
    pub fn get_bool_or(&self, section: &str, key: &str, default: bool) -> ShopResult<bool> {
        match self.inner.get_bool(&path(section, key)) {
            Ok(value) => Ok(value),
            Err(ConfigError::NotFound(_)) => Ok(default),
            Err(e) => Err(lookup_error(section, key, e)),
        }
    }

    /// A URL stored under the `ui` section
    pub fn ui_url(&self, key: &str) -> ShopResult<String> {
        self.get(UI_SECTION, key)
    }

    /// API base URL, optionally joined with a named endpoint suffix
    pub fn api_url(&self, endpoint: Option<&str>) -> ShopResult<String> {
        let base_url = self.get(API_SECTION, "base_url")?;
        match endpoint {
            None => Ok(base_url),
            Some(name) => Ok(base_url + &self.get(API_SECTION, name)?),
        }
    }

    /// Upper bound for every element wait (`ui.wait_driver`, seconds)
    pub fn wait_timeout(&self) -> ShopResult<Duration> {
        let secs = self.get_int(UI_SECTION, "wait_driver")?;
        non_negative(UI_SECTION, "wait_driver", secs).map(Duration::from_secs)
    }

    /// Interval between polls inside a wait (`ui.poll_interval_ms`)
    pub fn poll_interval(&self) -> ShopResult<Duration> {
        let ms = self.get_int_or(
            UI_SECTION,
            "poll_interval_ms",
            DEFAULT_POLL_INTERVAL_MS as i64,
        )?;
        non_negative(UI_SECTION, "poll_interval_ms", ms).map(Duration::from_millis)
    }

    /// Timeout for a single HTTP request (`api.request_timeout`, seconds)
    pub fn request_timeout(&self) -> ShopResult<Duration> {
        let secs = self.get_int_or(
            API_SECTION,
            "request_timeout",
            DEFAULT_REQUEST_TIMEOUT_SECS as i64,
        )?;
        non_negative(API_SECTION, "request_timeout", secs).map(Duration::from_secs)
    }

    /// Home and cart URLs of the storefront
    pub fn site_urls(&self) -> ShopResult<SiteUrls> {
        let base_url = self.get(UI_SECTION, "base_url")?;
        let cart_url = format!("{base_url}{}", self.get(UI_SECTION, "cart")?);
        Ok(SiteUrls { base_url, cart_url })
    }

    /// Browser launch settings from the `ui` section
    pub fn browser_settings(&self) -> ShopResult<BrowserSettings> {
        let defaults = BrowserSettings::default();
        let width = self.get_int_or(UI_SECTION, "window_width", i64::from(defaults.window_width))?;
        let height =
            self.get_int_or(UI_SECTION, "window_height", i64::from(defaults.window_height))?;
        let command_timeout = self.get_int_or(
            UI_SECTION,
            "timeout",
            defaults.command_timeout.as_secs() as i64,
        )?;

        Ok(BrowserSettings {
            headless: self.get_bool_or(UI_SECTION, "headless", defaults.headless)?,
            window_width: u32::try_from(width).map_err(|e| invalid(UI_SECTION, "window_width", e))?,
            window_height: u32::try_from(height)
                .map_err(|e| invalid(UI_SECTION, "window_height", e))?,
            chromium_path: self.get_opt(UI_SECTION, "chromium_path")?,
            command_timeout: non_negative(UI_SECTION, "timeout", command_timeout)
                .map(Duration::from_secs)?,
            sandbox: self.get_bool_or(UI_SECTION, "sandbox", defaults.sandbox)?,
        })
    }
}

/// Resolved storefront URLs shared by the page objects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrls {
    /// Storefront home page
    pub base_url: String,
    /// Cart page (`base_url` + `ui.cart`)
    pub cart_url: String,
}

fn path(section: &str, key: &str) -> String {
    format!("{section}.{key}")
}

fn lookup_error(section: &str, key: &str, error: ConfigError) -> ShopError {
    match error {
        ConfigError::NotFound(_) => ShopError::MissingSectionOrKey {
            section: section.to_string(),
            key: key.to_string(),
        },
        other => invalid(section, key, other),
    }
}

fn invalid(section: &str, key: &str, error: impl std::fmt::Display) -> ShopError {
    ShopError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: error.to_string(),
    }
}

fn non_negative(section: &str, key: &str, value: i64) -> ShopResult<u64> {
    u64::try_from(value).map_err(|_| invalid(section, key, format!("{value} is negative")))
}
