//! Types for the identity provider client

use serde::{Deserialize, Serialize};

/// Payload for creating a new identity account
#[derive(Debug, Clone, Serialize)]
pub struct AccountRequest {
    /// Login email for the account
    pub email: String,

    /// Initial password
    pub password: String,

    /// Human-readable name shown by the provider
    pub display_name: String,
}

impl AccountRequest {
    /// Create a new account request
    pub fn new(email: &str, password: &str, display_name: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

/// An account as returned by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Provider-assigned opaque identifier
    pub id: String,

    /// Login email for the account
    pub email: String,

    /// Human-readable name shown by the provider
    #[serde(default)]
    pub display_name: Option<String>,
}
