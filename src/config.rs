//! Client configuration.
//!
//! An [`ApiConfig`] is built once (directly or from environment variables)
//! and handed to [`BizClient::new`](crate::BizClient::new). It is immutable
//! for the lifetime of the client.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{BizError, Result};

/// Default HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default idle timeout for pooled connections.
///
/// Long-lived clients must periodically drop connections so DNS changes are
/// picked up; 5 minutes matches the platform's recommended lease.
pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration for a [`BizClient`](crate::BizClient).
///
/// # Example
///
/// ```no_run
/// use bizapi::ApiConfig;
///
/// let config = ApiConfig::new("acme.example.com", "integration.user", "secret");
///
/// // Local dev deployments self-host on a port without TLS:
/// let local = ApiConfig::new("localhost", "integration.user", "secret")
///     .with_ssl(false)
///     .with_port(8080);
/// ```
#[derive(Clone)]
pub struct ApiConfig {
    /// Site host name, e.g. `acme.example.com`.
    pub site: String,
    /// User name used by the authenticate call.
    pub user_name: String,
    /// Password used by the authenticate call.
    pub password: String,
    /// Whether to connect over HTTPS. Only false for local dev deployments.
    pub use_ssl: bool,
    /// Port override for non-standard deployments. `None` uses the scheme default.
    pub port: Option<u16>,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Idle timeout for pooled connections.
    pub pool_idle_timeout: Duration,
    /// Optional User-Agent header value sent on all requests.
    pub user_agent: Option<String>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("site", &self.site)
            .field("user_name", &self.user_name)
            .field("use_ssl", &self.use_ssl)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl ApiConfig {
    /// Create a configuration with default timeouts and HTTPS enabled.
    pub fn new(
        site: impl Into<String>,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            user_name: user_name.into(),
            password: password.into(),
            use_ssl: true,
            port: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
            user_agent: None,
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Uses `BIZAPI_SITE`, `BIZAPI_USERNAME` and `BIZAPI_PASSWORD`, plus the
    /// optional `BIZAPI_USE_SSL` (`true`/`false`) and `BIZAPI_PORT`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is not set or an optional one
    /// does not parse.
    pub fn from_env() -> Result<Self> {
        fn required(name: &str) -> Result<String> {
            env::var(name)
                .map_err(|_| BizError::ConfigMissing(format!("{name} environment variable not set")))
        }

        let mut config = Self::new(
            required("BIZAPI_SITE")?,
            required("BIZAPI_USERNAME")?,
            required("BIZAPI_PASSWORD")?,
        );

        if let Ok(use_ssl) = env::var("BIZAPI_USE_SSL") {
            config.use_ssl = use_ssl.parse().map_err(|_| {
                BizError::InvalidConfig(format!("BIZAPI_USE_SSL must be true or false, got {use_ssl:?}"))
            })?;
        }
        if let Ok(port) = env::var("BIZAPI_PORT") {
            config.port = Some(port.parse().map_err(|_| {
                BizError::InvalidConfig(format!("BIZAPI_PORT must be a port number, got {port:?}"))
            })?);
        }

        Ok(config)
    }

    /// Set whether to connect over HTTPS.
    #[must_use]
    pub fn with_ssl(mut self, use_ssl: bool) -> Self {
        self.use_ssl = use_ssl;
        self
    }

    /// Set a port override.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the User-Agent header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validate that the required fields are non-empty.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.site.is_empty() {
            return Err(BizError::ConfigMissing("site cannot be empty".to_string()));
        }
        if self.user_name.is_empty() {
            return Err(BizError::ConfigMissing("user name cannot be empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(BizError::ConfigMissing("password cannot be empty".to_string()));
        }
        Ok(())
    }

    fn site_root(&self) -> Result<Url> {
        let scheme = if self.use_ssl { "https" } else { "http" };
        let authority = match self.port {
            Some(port) => format!("{}:{}", self.site, port),
            None => self.site.clone(),
        };
        Ok(Url::parse(&format!("{scheme}://{authority}/"))?)
    }

    /// URL of the authenticate endpoint: `{scheme}://{site}[:{port}]/api/Authenticate`.
    pub fn authentication_url(&self) -> Result<Url> {
        Ok(self.site_root()?.join("api/Authenticate")?)
    }

    /// Base URL for business API resources: `{scheme}://{site}[:{port}]/api/biz/`.
    ///
    /// Resource paths are joined relative to this base, so the trailing slash
    /// matters.
    pub fn business_api_base_url(&self) -> Result<Url> {
        Ok(self.site_root()?.join("api/biz/")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let config = ApiConfig::new("acme.example.com", "user", "pass");
        assert_eq!(
            config.authentication_url().unwrap().as_str(),
            "https://acme.example.com/api/Authenticate"
        );
        assert_eq!(
            config.business_api_base_url().unwrap().as_str(),
            "https://acme.example.com/api/biz/"
        );
    }

    #[test]
    fn test_local_dev_urls() {
        let config = ApiConfig::new("localhost", "user", "pass")
            .with_ssl(false)
            .with_port(8473);
        assert_eq!(
            config.authentication_url().unwrap().as_str(),
            "http://localhost:8473/api/Authenticate"
        );
        assert_eq!(
            config.business_api_base_url().unwrap().as_str(),
            "http://localhost:8473/api/biz/"
        );
    }

    #[test]
    fn test_relative_join_from_base() {
        let config = ApiConfig::new("acme.example.com", "user", "pass");
        let base = config.business_api_base_url().unwrap();
        assert_eq!(
            base.join("Users/jane.doe").unwrap().as_str(),
            "https://acme.example.com/api/biz/Users/jane.doe"
        );
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        assert!(ApiConfig::new("", "user", "pass").validate().is_err());
        assert!(ApiConfig::new("site", "", "pass").validate().is_err());
        assert!(ApiConfig::new("site", "user", "").validate().is_err());
        assert!(ApiConfig::new("site", "user", "pass").validate().is_ok());
    }

    #[test]
    fn test_debug_hides_password() {
        let config = ApiConfig::new("site", "user", "s3cret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("s3cret"));
    }
}
