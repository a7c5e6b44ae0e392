//! HTTP request plumbing for the platform services
//!
//! A [`Fetch`] is a per-project request factory: every request it creates
//! already carries the project API key and the configured timeout, so the
//! service clients only add what varies per call (path, body, admin bearer).

use reqwest::{Client, RequestBuilder, Method, header::{HeaderMap, HeaderValue}};
use serde::Serialize;
use crate::error::Error;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Per-project request factory
#[derive(Clone)]
pub struct Fetch {
    client: Client,
    key: String,
    timeout: Option<Duration>,
}

impl Fetch {
    /// Create a new request factory for one platform project
    pub fn new(client: Client, key: &str, timeout: Option<Duration>) -> Self {
        Self {
            client,
            key: key.to_string(),
            timeout,
        }
    }

    /// Create a GET request
    pub fn get(&self, url: &str) -> FetchBuilder<'_> {
        self.request(Method::GET, url)
    }

    /// Create a POST request
    pub fn post(&self, url: &str) -> FetchBuilder<'_> {
        self.request(Method::POST, url)
    }

    /// Create a PATCH request
    pub fn patch(&self, url: &str) -> FetchBuilder<'_> {
        self.request(Method::PATCH, url)
    }

    /// Create a DELETE request
    pub fn delete(&self, url: &str) -> FetchBuilder<'_> {
        self.request(Method::DELETE, url)
    }

    fn request(&self, method: Method, url: &str) -> FetchBuilder<'_> {
        FetchBuilder::new(&self.client, url, method, self.timeout).header("apikey", &self.key)
    }
}

/// Helper for building and executing one HTTP request
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Option<HashMap<String, String>>,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl<'a> FetchBuilder<'a> {
    fn new(client: &'a Client, url: &str, method: Method, timeout: Option<Duration>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        Self {
            client,
            url: url.to_string(),
            method,
            headers,
            query_params: None,
            body: None,
            timeout,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add bearer token authentication to the request
    pub fn bearer_auth(self, token: &str) -> Self {
        let value = format!("Bearer {}", token);
        self.header("Authorization", &value)
    }

    /// Add query parameters to the request
    pub fn query(mut self, params: HashMap<String, String>) -> Self {
        self.query_params = Some(params);
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, Error> {
        let json = serde_json::to_vec(body)?;
        self.body = Some(json);
        Ok(self)
    }

    /// Build the request
    fn build(&self) -> Result<RequestBuilder, Error> {
        let mut url = Url::parse(&self.url)?;

        // Add query parameters if present
        if let Some(params) = &self.query_params {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in params {
                query_pairs.append_pair(key, value);
            }
        }

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    /// Execute the request and return the raw response
    pub async fn execute_raw(&self) -> Result<reqwest::Response, Error> {
        let req = self.build()?;
        let response = req.send().await?;
        Ok(response)
    }
}
