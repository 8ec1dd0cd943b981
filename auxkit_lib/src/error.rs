//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding cache, serialization, configuration, and input failures.
#[derive(Debug)]
pub enum AuxkitError {
    /// An error from the underlying page client.
    Api(auxkit_api::Error),
    /// A cached page could not be decoded.
    Cache(String),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// The configuration file or an environment override was rejected.
    Config(String),
}

impl fmt::Display for AuxkitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Cache(msg) => write!(f, "Cache error: {}", msg),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for AuxkitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<auxkit_api::Error> for AuxkitError {
    fn from(e: auxkit_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for AuxkitError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<toml::de::Error> for AuxkitError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}
