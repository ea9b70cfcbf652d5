use std::error::Error as StdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkillError {
    #[error("Joke feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("Joke feed returned an empty listing")]
    EmptyListing,

    #[error("No handler can route request: {0}")]
    Unroutable(String),

    #[error("Request rejected: {0}")]
    RequestRejected(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<reqwest::Error> for SkillError {
    fn from(error: reqwest::Error) -> Self {
        SkillError::FeedUnavailable(error_chain(&error))
    }
}

impl From<url::ParseError> for SkillError {
    fn from(error: url::ParseError) -> Self {
        SkillError::ConfigError(error.to_string())
    }
}

impl From<anyhow::Error> for SkillError {
    fn from(error: anyhow::Error) -> Self {
        SkillError::InternalError(format!("{error:#}"))
    }
}

/// Renders an error followed by each of its sources, separated by `": "`.
pub fn error_chain(error: &(dyn StdError + 'static)) -> String {
    std::iter::successors(Some(error), |&e| e.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}
