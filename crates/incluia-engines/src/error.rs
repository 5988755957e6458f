use reqwest::StatusCode;

/// Every failure mode a single provider round-trip can hit.
///
/// The gateway wraps this into [`incluia_core::IncluiaError::Provider`]
/// together with the engine tag before it leaves the crate.
#[derive(Debug, thiserror::Error)]
pub enum EngineHttpError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn't serialise body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("provider returned non-success status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("provider response format error: {0}")]
    Format(String),
}
