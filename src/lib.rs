//! gestdoc backend library
//!
//! Backend access layer for a business document-management application built
//! on a hosted platform: an identity provider for accounts, a schemaless
//! document store for records, and a trigger runtime for serverless
//! functions. The crate provides the platform clients, the user-provisioning
//! trigger core, and the invoice/albaran listing read path; rendering the
//! rows is left to the consuming UI.

pub mod config;
pub mod error;
pub mod fetch;
pub mod identity;
pub mod listing;
pub mod provision;
pub mod store;

use reqwest::Client;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::identity::IdentityAdmin;
use crate::listing::{DocumentListing, DocumentType};
use crate::provision::Provisioner;
use crate::store::Collection;

/// The main entry point for the platform clients
pub struct Platform {
    /// The base URL for the platform project
    pub url: String,
    /// The anonymous API key for the platform project
    pub key: String,
    /// The service-role key, required for identity admin operations
    service_key: Option<String>,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
}

impl Platform {
    /// Create a new platform client
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL for the platform project
    /// * `key` - The anonymous API key for the platform project
    pub fn new(url: &str, key: &str) -> Self {
        Self::new_with_options(url, key, ClientOptions::default())
    }

    /// Create a new platform client with custom options
    pub fn new_with_options(url: &str, key: &str, options: ClientOptions) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            service_key: None,
            http_client: Client::new(),
            options,
        }
    }

    /// Attach the service-role key authorizing admin operations
    ///
    /// Server-side only; never ship this key to a client application.
    pub fn with_service_key(mut self, service_key: &str) -> Self {
        self.service_key = Some(service_key.to_string());
        self
    }

    /// Get the identity admin client
    ///
    /// Fails when no service-role key was attached.
    pub fn identity_admin(&self) -> Result<IdentityAdmin, Error> {
        let service_key = self
            .service_key
            .as_deref()
            .ok_or_else(|| Error::general("identity admin requires a service-role key"))?;

        Ok(IdentityAdmin::new(
            &self.url,
            &self.key,
            service_key,
            self.http_client.clone(),
            self.options.clone(),
        ))
    }

    /// Get a handle for a named collection in the document store
    pub fn collection(&self, name: &str) -> Collection {
        Collection::new(
            &self.url,
            &self.key,
            name,
            self.http_client.clone(),
            self.options.clone(),
        )
    }

    /// Build the user-provisioning trigger executor
    ///
    /// Requires the service-role key: provisioning creates identity accounts.
    pub fn provisioner(&self) -> Result<Provisioner, Error> {
        Ok(Provisioner::new(
            self.identity_admin()?,
            self.collection(&self.options.users_collection),
            self.options.initial_password_length,
        ))
    }

    /// Build a listing handle for one document type and owner cif
    pub fn listing(&self, doc_type: DocumentType, cif: &str) -> DocumentListing {
        DocumentListing::new(
            self.collection(&self.options.documents_collection),
            doc_type,
            cif,
        )
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::listing::{DocumentRow, DocumentType, ListState};
    pub use crate::provision::{CreationEvent, ProvisionOutcome};
    pub use crate::Platform;
}
