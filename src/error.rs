//! Error handling for the gestdoc backend client

use std::fmt;
use thiserror::Error;

/// Unified error type for the gestdoc backend client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The identity provider rejected the new account
    #[error("Account creation error: {0}")]
    AccountCreation(String),

    /// The post-creation write to the user record failed
    #[error("Record update error: {0}")]
    RecordUpdate(String),

    /// A document store query failed
    #[error("Query error: {0}")]
    Query(String),

    /// A required field was absent or blank in a record snapshot
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A stored document carries a value the listing cannot interpret
    #[error("Malformed document {id}: {reason}")]
    MalformedDocument { id: String, reason: String },

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new account creation error
    pub fn account_creation<T: fmt::Display>(msg: T) -> Self {
        Error::AccountCreation(msg.to_string())
    }

    /// Create a new record update error
    pub fn record_update<T: fmt::Display>(msg: T) -> Self {
        Error::RecordUpdate(msg.to_string())
    }

    /// Create a new query error
    pub fn query<T: fmt::Display>(msg: T) -> Self {
        Error::Query(msg.to_string())
    }

    /// Create a new malformed document error
    pub fn malformed_document<I: fmt::Display, R: fmt::Display>(id: I, reason: R) -> Self {
        Error::MalformedDocument {
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }
}
