use thiserror::Error;

/// Errors raised by the extraction pipeline and its completion providers.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error (status {status}): {body}")]
    AiApi { status: u16, body: String },
    #[error("AI provider rate limit or quota exceeded: {0}")]
    RateLimited(String),
    #[error("API key is missing")]
    MissingApiKey,
    #[error("AI provider is not configured")]
    MissingAiProvider,
    #[error("Search provider is not configured")]
    MissingSearchProvider,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ExtractError {
    /// Whether the failure is a rate-limit or quota signal from the completion provider.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ExtractError::RateLimited(_))
    }
}

/// Returns true when a provider error message describes a rate limit or exhausted quota.
pub fn is_rate_limit_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    message.contains("429")
        || lower.contains("quota")
        || lower.contains("resource_exhausted")
        || lower.contains("resourceexhausted")
        || lower.contains("rate limit")
}

/// The model output did not contain a usable JSON object.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no JSON object found")]
    NoJsonObject,
    #[error("malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),
    #[error("JSON value is not an object")]
    NotAnObject,
}

/// The JSON object was well-formed but not an acceptable asset record.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("field is not a string: {0}")]
    NotAString(String),
    #[error("field must not be empty: {0}")]
    EmptyField(String),
}

/// Any reason a raw model response was rejected.
#[derive(Error, Debug)]
pub enum ResponseError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors raised by a web search provider.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Failed to build search client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Search provider returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Failed to parse search results: {0}")]
    Parse(String),
}
