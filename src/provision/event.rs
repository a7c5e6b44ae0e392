//! Trigger event payload from the hosting runtime
//!
//! The platform fires the provisioning trigger once per record created under
//! `users/{userId}` and delivers the binding parameters together with a field
//! snapshot of the new record. This module is the only place aware of that
//! wire shape; the rest of the pipeline works on [`CreationEvent`].

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::Error;

/// A record-creation event as seen by the provisioning trigger
#[derive(Debug, Clone)]
pub struct CreationEvent {
    /// The collection key of the newly created user record
    pub user_id: String,

    /// Field snapshot of the record at creation time
    pub snapshot: Map<String, Value>,
}

#[derive(Deserialize)]
struct EventPayload {
    params: EventParams,
    #[serde(default)]
    data: Map<String, Value>,
}

#[derive(Deserialize)]
struct EventParams {
    #[serde(rename = "userId")]
    user_id: String,
}

impl CreationEvent {
    /// Create an event directly from its parts
    pub fn new(user_id: &str, snapshot: Map<String, Value>) -> Self {
        Self {
            user_id: user_id.to_string(),
            snapshot,
        }
    }

    /// Parse the hosting runtime's JSON event payload
    pub fn from_json(payload: &str) -> Result<Self, Error> {
        let payload: EventPayload = serde_json::from_str(payload)?;
        Ok(Self {
            user_id: payload.params.user_id,
            snapshot: payload.data,
        })
    }
}
