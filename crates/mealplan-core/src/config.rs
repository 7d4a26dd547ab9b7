use std::time::Duration;

/// Default Spoonacular API host.
pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

/// Upstream calls get one attempt with this deadline; a timed-out call
/// fails the whole invocation.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the Spoonacular API.
///
/// Read once at process start and handed to the client at construction.
/// A missing credential is kept as `None` and only rejected when a call
/// is actually made, not at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl ApiConfig {
    /// Read the configuration from the process environment.
    ///
    /// `SPOONACULAR_API_KEY` carries the credential; an empty value counts
    /// as unset. `SPOONACULAR_BASE_URL` overrides the upstream host.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("SPOONACULAR_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            base_url: std::env::var("SPOONACULAR_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_credential() {
        let config = ApiConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn with_api_key_sets_credential() {
        let config = ApiConfig::default().with_api_key("abc123");
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn with_base_url_overrides_host() {
        let config = ApiConfig::default().with_base_url("http://localhost:9999");
        assert_eq!(config.base_url, "http://localhost:9999");
    }
}
