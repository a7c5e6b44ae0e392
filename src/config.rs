//! Configuration options for the platform client

use std::time::Duration;

/// Configuration options for the platform client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// The collection holding user records
    pub users_collection: String,

    /// The collection holding invoice and albaran documents
    pub documents_collection: String,

    /// Length of the generated initial password for new accounts
    pub initial_password_length: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            users_collection: "users".to_string(),
            documents_collection: "documents".to_string(),
            initial_password_length: 24,
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the collection holding user records
    pub fn with_users_collection(mut self, value: &str) -> Self {
        self.users_collection = value.to_string();
        self
    }

    /// Set the collection holding invoice and albaran documents
    pub fn with_documents_collection(mut self, value: &str) -> Self {
        self.documents_collection = value.to_string();
        self
    }

    /// Set the length of the generated initial password
    pub fn with_initial_password_length(mut self, value: usize) -> Self {
        self.initial_password_length = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_platform_collections() {
        let options = ClientOptions::default();
        assert_eq!(options.users_collection, "users");
        assert_eq!(options.documents_collection, "documents");
        assert_eq!(options.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn builder_overrides() {
        let options = ClientOptions::default()
            .with_users_collection("members")
            .with_documents_collection("docs")
            .with_request_timeout(None);
        assert_eq!(options.users_collection, "members");
        assert_eq!(options.documents_collection, "docs");
        assert_eq!(options.request_timeout, None);
    }
}
