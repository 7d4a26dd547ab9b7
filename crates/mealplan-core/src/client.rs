use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::MealPlanError;

/// Thin wrapper around a reqwest Client configured for the Spoonacular API.
///
/// Holds the read-once configuration; the credential check is deferred to
/// call time so a server can start without a key and fail per request.
pub struct SpoonacularClient {
    inner: reqwest::Client,
    config: ApiConfig,
}

impl SpoonacularClient {
    /// Build a client from the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self, MealPlanError> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("mealplan/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { inner, config })
    }

    /// Issue a single GET against `endpoint` with the given query parameters.
    ///
    /// The credential is appended as the final `apiKey` parameter and never
    /// logged. One request, no retries: a non-success status fails with the
    /// propagated status and body, and a success body that is not valid
    /// JSON fails as malformed.
    pub async fn get(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Value, MealPlanError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(MealPlanError::Configuration)?;

        let url = format!("{}{}", self.config.base_url, endpoint);
        debug!("GET {endpoint}");

        let response = self
            .inner
            .get(&url)
            .query(params)
            .query(&[("apiKey", api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MealPlanError::RemoteRequest {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        debug!("GET {endpoint} -> {status} ({} bytes)", body.len());

        serde_json::from_str(&body).map_err(|e| MealPlanError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_default_config() {
        let client = SpoonacularClient::new(ApiConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn client_builds_with_credential_and_override() {
        let config = ApiConfig::default()
            .with_api_key("test-key")
            .with_base_url("http://localhost:1");
        assert!(SpoonacularClient::new(config).is_ok());
    }
}
