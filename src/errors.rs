//! # Error Types Module
//!
//! Error kinds produced while answering a single interaction. The router maps
//! each kind onto a user-visible text; none of them reach the user verbatim.

use crate::weather::WeatherError;

/// Catalog lookup that came back empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Unknown plant or incomplete plant card
    Plant(String),
    Pest(String),
    Season(String),
}

impl std::fmt::Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookup::Plant(key) => write!(f, "plant {key}"),
            Lookup::Pest(key) => write!(f, "pest {key}"),
            Lookup::Season(key) => write!(f, "season {key}"),
        }
    }
}

/// Errors raised while producing a reply
#[derive(Debug)]
pub enum BotError {
    /// Unknown plant, pest or season key, or an incomplete record
    NotFound(Lookup),
    /// Callback payload that does not decode into a command
    MalformedToken(String),
    /// Weather provider failure
    Upstream(WeatherError),
    /// Anything else that went wrong inside a handler
    Internal(String),
}

impl std::fmt::Display for BotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotError::NotFound(lookup) => write!(f, "Not found: {lookup}"),
            BotError::MalformedToken(token) => write!(f, "Malformed action token: {token}"),
            BotError::Upstream(err) => write!(f, "Upstream failure: {err}"),
            BotError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for BotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BotError::Upstream(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WeatherError> for BotError {
    fn from(err: WeatherError) -> Self {
        BotError::Upstream(err)
    }
}
