//! Account management against the hosted identity provider
//!
//! The provisioning trigger runs server-side, so every operation here goes
//! through the provider's admin surface and authenticates with the
//! service-role key rather than the anonymous project key.

mod types;

use reqwest::Client;
use serde_json::json;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;

pub use types::*;

/// Admin client for the identity provider
pub struct IdentityAdmin {
    /// The base URL for the platform project
    url: String,

    /// The service-role key authorizing admin operations
    service_key: String,

    /// Request factory carrying the project key and timeout
    fetch: Fetch,
}

impl IdentityAdmin {
    /// Create a new IdentityAdmin client
    pub(crate) fn new(
        url: &str,
        key: &str,
        service_key: &str,
        client: Client,
        options: ClientOptions,
    ) -> Self {
        Self {
            url: url.to_string(),
            service_key: service_key.to_string(),
            fetch: Fetch::new(client, key, options.request_timeout),
        }
    }

    fn get_admin_url(&self, path: &str) -> String {
        format!("{}/identity/v1/admin{}", self.url, path)
    }

    /// Create a new identity account
    ///
    /// Fails with [`Error::AccountCreation`] when the provider rejects the
    /// account (duplicate or invalid email, weak password).
    pub async fn create_account(&self, request: &AccountRequest) -> Result<Account, Error> {
        let url = self.get_admin_url("/accounts");

        let response = self
            .fetch
            .post(&url)
            .bearer_auth(&self.service_key)
            .json(request)?
            .execute_raw()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::account_creation(text));
        }

        let account: Account = response.json().await?;
        Ok(account)
    }

    /// Delete an identity account
    ///
    /// Used by the provisioner to undo an account creation whose record
    /// write-back failed.
    pub async fn delete_account(&self, account_id: &str) -> Result<(), Error> {
        let url = self.get_admin_url(&format!("/accounts/{}", account_id));

        let response = self
            .fetch
            .delete(&url)
            .bearer_auth(&self.service_key)
            .execute_raw()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::general(format!(
                "Failed to delete account {}: {}",
                account_id, text
            )));
        }

        Ok(())
    }

    /// Send a password-recovery mail to an account
    pub async fn send_recovery(&self, email: &str) -> Result<(), Error> {
        let url = format!("{}/identity/v1/recover", self.url);

        let payload = json!({ "email": email });

        let response = self
            .fetch
            .post(&url)
            .json(&payload)?
            .execute_raw()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::general(format!(
                "Failed to send recovery mail: {}",
                text
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn admin(server: &MockServer) -> IdentityAdmin {
        IdentityAdmin::new(
            &server.uri(),
            "test_anon_key",
            "test_service_key",
            Client::new(),
            ClientOptions::default(),
        )
    }

    #[test]
    fn test_create_account() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/identity/v1/admin/accounts"))
                .and(header("apikey", "test_anon_key"))
                .and(header("Authorization", "Bearer test_service_key"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "id": "acc-1",
                    "email": "ana@example.com",
                    "display_name": "Ana Santos"
                })))
                .mount(&mock_server)
                .await;

            let request = AccountRequest::new("ana@example.com", "s3cret", "Ana Santos");
            let account = admin(&mock_server).create_account(&request).await.unwrap();

            assert_eq!(account.id, "acc-1");
            assert_eq!(account.email, "ana@example.com");
            assert_eq!(account.display_name.as_deref(), Some("Ana Santos"));
        });
    }

    #[test]
    fn test_create_account_rejection() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/identity/v1/admin/accounts"))
                .respond_with(ResponseTemplate::new(422).set_body_string("invalid email"))
                .mount(&mock_server)
                .await;

            let request = AccountRequest::new("not-an-email", "s3cret", "Ana Santos");
            let result = admin(&mock_server).create_account(&request).await;

            match result {
                Err(Error::AccountCreation(msg)) => assert!(msg.contains("invalid email")),
                other => panic!("expected AccountCreation error, got {:?}", other),
            }
        });
    }
}
