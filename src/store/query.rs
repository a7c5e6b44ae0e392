//! Query builder for collection reads

use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::error::Error;
use crate::fetch::Fetch;

/// Builder for filtered collection queries
///
/// Filters combine conjunctively and use the store's `column=eq.value`
/// dialect. Only equality filters are exposed; the subsystems here never
/// order or paginate.
pub struct SelectBuilder {
    /// The base URL for the request
    url: String,

    /// Request factory carrying the project key and timeout
    fetch: Fetch,

    /// Query parameters
    params: HashMap<String, String>,
}

impl SelectBuilder {
    /// Create a new SelectBuilder
    pub(crate) fn new(url: String, fetch: Fetch) -> Self {
        Self {
            url,
            fetch,
            params: HashMap::new(),
        }
    }

    /// Filter records where a column equals a value
    pub fn eq<T: ToString>(mut self, column: &str, value: T) -> Self {
        let filter = format!("eq.{}", value.to_string());
        self.params.insert(column.to_string(), filter);
        self
    }

    /// Limit the number of records returned
    pub fn limit(mut self, count: u32) -> Self {
        self.params.insert("limit".to_string(), count.to_string());
        self
    }

    /// Execute the query and deserialize the matching records
    pub async fn execute<T: DeserializeOwned>(self) -> Result<Vec<T>, Error> {
        let response = self
            .fetch
            .get(&self.url)
            .query(self.params)
            .execute_raw()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::query(format!("{}: {}", status, text)));
        }

        let records: Vec<T> = response.json().await?;
        Ok(records)
    }
}
