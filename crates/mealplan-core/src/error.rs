#[derive(Debug, thiserror::Error)]
pub enum MealPlanError {
    #[error("SPOONACULAR_API_KEY environment variable is not set")]
    Configuration,

    #[error("invalid time frame '{0}': must be either 'day' or 'week'")]
    InvalidArgument(String),

    #[error("Spoonacular returned status {status}: {body}")]
    RemoteRequest { status: u16, body: String },

    #[error("malformed response body: {0}")]
    MalformedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
