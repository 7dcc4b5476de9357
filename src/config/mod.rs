//! Configuration types for the HATEOAS client.
//!
//! # Overview
//!
//! - [`HateoasConfig`]: the settings shared by every request of a client
//! - [`HateoasConfigBuilder`]: a builder for constructing [`HateoasConfig`]
//! - [`BaseUrl`]: the validated root URL of the HAL API
//! - [`HalFormat`]: tolerances for servers that deviate from strict HAL
//!
//! # Example
//!
//! ```rust
//! use hateoas_client::{BaseUrl, HateoasConfig};
//!
//! let config = HateoasConfig::builder()
//!     .base_url(BaseUrl::new("http://localhost:8080/api/v1").unwrap())
//!     .verbose_logs(true)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.verbose_logs());
//! ```

mod newtypes;

pub use newtypes::BaseUrl;

use std::collections::HashMap;

use reqwest::header::{HeaderName, HeaderValue};

use crate::error::ConfigError;

/// Default lifetime of cached GET responses, in seconds.
pub const DEFAULT_CACHE_LIFETIME_SECS: i64 = 300;

/// Tolerances for the HAL document shapes returned by the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HalFormat {
    /// Accept collection responses that omit the `_embedded` block.
    ///
    /// Spring Data REST drops `_embedded` entirely when a collection is empty.
    pub embedded_optional: bool,
}

/// Configuration for the HATEOAS client.
///
/// Set once at startup and passed to [`HalClient::new`](crate::HalClient::new).
///
/// # Thread Safety
///
/// `HateoasConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct HateoasConfig {
    base_url: BaseUrl,
    verbose_logs: bool,
    cache_enabled: bool,
    cache_lifetime: chrono::Duration,
    hal_format: HalFormat,
    user_agent_prefix: Option<String>,
    default_headers: HashMap<String, String>,
}

impl HateoasConfig {
    /// Creates a new builder for constructing a `HateoasConfig`.
    #[must_use]
    pub fn builder() -> HateoasConfigBuilder {
        HateoasConfigBuilder::new()
    }

    /// Returns the root URL of the API.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns whether stage logging is raised to `info`.
    #[must_use]
    pub const fn verbose_logs(&self) -> bool {
        self.verbose_logs
    }

    /// Returns whether GET responses are cached.
    #[must_use]
    pub const fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Returns how long a cached response stays valid.
    #[must_use]
    pub const fn cache_lifetime(&self) -> chrono::Duration {
        self.cache_lifetime
    }

    /// Returns the HAL format tolerances.
    #[must_use]
    pub const fn hal_format(&self) -> HalFormat {
        self.hal_format
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HateoasConfig>();
};

/// Builder for constructing [`HateoasConfig`] instances.
///
/// `base_url` is required.
///
/// # Defaults
///
/// - `verbose_logs`: `false`
/// - `cache_enabled`: `false`
/// - `cache_lifetime`: 300 seconds
/// - `hal_format`: strict (`embedded_optional = false`)
/// - `user_agent_prefix`: `None`
/// - `default_headers`: empty
#[derive(Debug, Default)]
pub struct HateoasConfigBuilder {
    base_url: Option<BaseUrl>,
    verbose_logs: Option<bool>,
    cache_enabled: Option<bool>,
    cache_lifetime: Option<chrono::Duration>,
    hal_format: Option<HalFormat>,
    user_agent_prefix: Option<String>,
    default_headers: HashMap<String, String>,
}

impl HateoasConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root URL of the API (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Enables `info`-level stage logging.
    #[must_use]
    pub const fn verbose_logs(mut self, verbose: bool) -> Self {
        self.verbose_logs = Some(verbose);
        self
    }

    /// Enables caching of GET responses.
    #[must_use]
    pub const fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = Some(enabled);
        self
    }

    /// Sets how long a cached response stays valid.
    #[must_use]
    pub const fn cache_lifetime(mut self, lifetime: chrono::Duration) -> Self {
        self.cache_lifetime = Some(lifetime);
        self
    }

    /// Sets the HAL format tolerances.
    #[must_use]
    pub const fn hal_format(mut self, format: HalFormat) -> Self {
        self.hal_format = Some(format);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Builds the [`HateoasConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set
    /// and [`ConfigError::InvalidHeader`] for a default header or user agent
    /// prefix that is not a valid HTTP header.
    pub fn build(self) -> Result<HateoasConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        let invalid = |(name, value): &(&String, &String)| {
            HeaderName::from_bytes(name.as_bytes()).is_err()
                || HeaderValue::from_str(value).is_err()
        };
        if let Some((name, _)) = self.default_headers.iter().find(invalid) {
            return Err(ConfigError::InvalidHeader { name: name.clone() });
        }
        if let Some(prefix) = &self.user_agent_prefix {
            if HeaderValue::from_str(prefix).is_err() {
                return Err(ConfigError::InvalidHeader {
                    name: "User-Agent".to_string(),
                });
            }
        }

        Ok(HateoasConfig {
            base_url,
            verbose_logs: self.verbose_logs.unwrap_or(false),
            cache_enabled: self.cache_enabled.unwrap_or(false),
            cache_lifetime: self
                .cache_lifetime
                .unwrap_or_else(|| chrono::Duration::seconds(DEFAULT_CACHE_LIFETIME_SECS)),
            hal_format: self.hal_format.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            default_headers: self.default_headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> BaseUrl {
        BaseUrl::new("http://localhost:8080/api/v1").unwrap()
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = HateoasConfigBuilder::new().verbose_logs(true).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "base_url" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = HateoasConfig::builder().base_url(base_url()).build().unwrap();

        assert_eq!(config.base_url().as_ref(), "http://localhost:8080/api/v1");
        assert!(!config.verbose_logs());
        assert!(!config.cache_enabled());
        assert_eq!(
            config.cache_lifetime(),
            chrono::Duration::seconds(DEFAULT_CACHE_LIFETIME_SECS)
        );
        assert!(!config.hal_format().embedded_optional);
        assert!(config.user_agent_prefix().is_none());
        assert!(config.default_headers().is_empty());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = HateoasConfig::builder()
            .base_url(base_url())
            .verbose_logs(true)
            .cache_enabled(true)
            .cache_lifetime(chrono::Duration::seconds(10))
            .hal_format(HalFormat {
                embedded_optional: true,
            })
            .user_agent_prefix("MyApp/1.0")
            .default_header("Authorization", "Bearer token")
            .build()
            .unwrap();

        assert!(config.verbose_logs());
        assert!(config.cache_enabled());
        assert_eq!(config.cache_lifetime(), chrono::Duration::seconds(10));
        assert!(config.hal_format().embedded_optional);
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(
            config.default_headers().get("Authorization"),
            Some(&"Bearer token".to_string())
        );
    }

    #[test]
    fn test_builder_rejects_blank_header_name() {
        let result = HateoasConfig::builder()
            .base_url(base_url())
            .default_header(" ", "value")
            .build();

        assert!(matches!(result, Err(ConfigError::InvalidHeader { .. })));
    }

    #[test]
    fn test_builder_rejects_invalid_header_name_and_value() {
        let bad_name = HateoasConfig::builder()
            .base_url(base_url())
            .default_header("X Tenant", "acme")
            .build();
        assert!(matches!(
            bad_name,
            Err(ConfigError::InvalidHeader { ref name }) if name == "X Tenant"
        ));

        let bad_value = HateoasConfig::builder()
            .base_url(base_url())
            .default_header("X-Tenant", "acme\nX-Injected: 1")
            .build();
        assert!(matches!(
            bad_value,
            Err(ConfigError::InvalidHeader { ref name }) if name == "X-Tenant"
        ));

        let bad_prefix = HateoasConfig::builder()
            .base_url(base_url())
            .user_agent_prefix("App\r\n")
            .build();
        assert!(matches!(bad_prefix, Err(ConfigError::InvalidHeader { .. })));
    }

    #[test]
    fn test_config_is_clone_and_debug() {
        let config = HateoasConfig::builder().base_url(base_url()).build().unwrap();
        let cloned = config.clone();
        assert_eq!(cloned.base_url(), config.base_url());
        assert!(format!("{config:?}").contains("HateoasConfig"));
    }
}
