//! The user-provisioning trigger core
//!
//! Fired once per record created in the users collection: creates the
//! matching identity account and writes the account id back to the record.
//! The two side effects are strictly sequential and not transactional across
//! the two services, so a failed write-back compensates by deleting the
//! account it just created; the platform's at-least-once redelivery then
//! retries the whole invocation cleanly.

mod event;
mod plan;

use serde_json::{json, Map, Value};
use tracing::{error, info, warn};

use crate::error::Error;
use crate::identity::IdentityAdmin;
use crate::store::Collection;

pub use event::*;
pub use plan::*;

/// Result of one trigger invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ProvisionOutcome {
    /// An account was created and linked to the record
    Provisioned {
        /// The provider-assigned account id written to the record
        account_id: String,
    },

    /// The record already carries an account id; redelivered event skipped
    AlreadyProvisioned,
}

/// Executes the provisioning side effects for creation events
pub struct Provisioner {
    identity: IdentityAdmin,
    users: Collection,
    password_length: usize,
}

impl Provisioner {
    /// Create a new Provisioner
    pub(crate) fn new(identity: IdentityAdmin, users: Collection, password_length: usize) -> Self {
        Self {
            identity,
            users,
            password_length,
        }
    }

    /// Handle one record-creation event
    ///
    /// Idempotent against redelivery: the record is re-read before any side
    /// effect, and an existing `uid` skips the invocation. No local retry is
    /// performed; failures propagate to the hosting platform.
    pub async fn run(&self, event: &CreationEvent) -> Result<ProvisionOutcome, Error> {
        let plan =
            ProvisionPlan::from_snapshot(&event.user_id, &event.snapshot, self.password_length)?;

        let (user_id, request) = match plan {
            ProvisionPlan::AlreadyProvisioned { user_id, account_id } => {
                info!(user_id = %user_id, account_id = %account_id, "user already provisioned, skipping");
                return Ok(ProvisionOutcome::AlreadyProvisioned);
            }
            ProvisionPlan::Create { user_id, request } => (user_id, request),
        };

        // The snapshot can be stale on redelivery; the stored record is
        // authoritative for the idempotency check.
        let record: Map<String, Value> = self
            .users
            .get(&user_id)
            .await?
            .ok_or_else(|| {
                Error::record_update(format!("user record {} no longer exists", user_id))
            })?;

        if let Some(account_id) = record.get("uid").and_then(Value::as_str) {
            if !account_id.trim().is_empty() {
                info!(user_id = %user_id, account_id = %account_id, "user already provisioned, skipping");
                return Ok(ProvisionOutcome::AlreadyProvisioned);
            }
        }

        let account = self.identity.create_account(&request).await?;

        if let Err(update_err) = self
            .users
            .update(&user_id, &json!({ "uid": account.id }))
            .await
        {
            // The account exists without record linkage; undo it so the
            // redelivered event starts from a clean slate.
            warn!(user_id = %user_id, account_id = %account.id, "record update failed, deleting account");
            if let Err(delete_err) = self.identity.delete_account(&account.id).await {
                error!(
                    account_id = %account.id,
                    error = %delete_err,
                    "orphaned identity account, manual reconciliation required"
                );
            }
            return Err(update_err);
        }

        // Best effort: the user sets a real credential through this mail, a
        // failure here must not undo the provisioning.
        if let Err(recover_err) = self.identity.send_recovery(&request.email).await {
            warn!(email = %request.email, error = %recover_err, "recovery mail failed");
        }

        info!(email = %request.email, account_id = %account.id, "new user provisioned");

        Ok(ProvisionOutcome::Provisioned {
            account_id: account.id,
        })
    }
}
