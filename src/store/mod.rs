//! Record operations against the hosted document store

mod query;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;

pub use query::*;

/// Handle for one named collection in the document store
pub struct Collection {
    /// The base URL for the platform project
    url: String,

    /// The collection name
    name: String,

    /// Request factory carrying the project key and timeout
    fetch: Fetch,
}

impl Collection {
    /// Create a new collection handle
    pub(crate) fn new(
        url: &str,
        key: &str,
        name: &str,
        client: Client,
        options: ClientOptions,
    ) -> Self {
        Self {
            url: url.to_string(),
            name: name.to_string(),
            fetch: Fetch::new(client, key, options.request_timeout),
        }
    }

    /// Get the base URL for record requests against this collection
    fn get_url(&self) -> String {
        format!("{}/store/v1/{}", self.url, self.name)
    }

    /// Query records in the collection
    pub fn select(&self) -> SelectBuilder {
        SelectBuilder::new(self.get_url(), self.fetch.clone())
    }

    /// Read a single record by its collection key
    ///
    /// Returns `None` when no record exists under the key.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, Error> {
        let url = format!("{}/{}", self.get_url(), key);

        let response = self.fetch.get(&url).execute_raw().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::query(text));
        }

        let record: T = response.json().await?;
        Ok(Some(record))
    }

    /// Update fields of a single record, addressed by its collection key
    ///
    /// Fails with [`Error::RecordUpdate`]; a record deleted concurrently
    /// surfaces as the store's not-found rejection.
    pub async fn update<T: Serialize>(&self, key: &str, fields: &T) -> Result<(), Error> {
        let url = format!("{}/{}", self.get_url(), key);

        let response = self
            .fetch
            .patch(&url)
            .json(fields)?
            .execute_raw()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::record_update(format!(
                "{}/{} ({}): {}",
                self.name, key, status, text
            )));
        }

        Ok(())
    }
}
