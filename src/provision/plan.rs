//! Pure provisioning core: snapshot validation and the side-effect plan
//!
//! Everything in this module is I/O-free so the trigger logic can be tested
//! without the hosting platform.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::{Map, Value};

use crate::error::Error;
use crate::identity::AccountRequest;

/// Validated view of a newly created user record
#[derive(Debug, Clone, PartialEq)]
pub struct UserSnapshot {
    pub email: String,
    pub cif: String,
    pub name: String,
    pub last_name: String,

    /// Identity account id, present only after a previous provisioning run
    pub uid: Option<String>,
}

impl UserSnapshot {
    /// Extract and validate the identity fields from a raw field snapshot
    ///
    /// Required fields that are absent, non-string, or blank fail with
    /// [`Error::MissingField`] before any side effect takes place.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, Error> {
        Ok(Self {
            email: required_str(fields, "email")?,
            cif: required_str(fields, "cif")?,
            name: required_str(fields, "name")?,
            last_name: required_str(fields, "lastName")?,
            uid: optional_str(fields, "uid"),
        })
    }

    /// The provider-facing display name, `"name lastName"`
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }
}

fn required_str(fields: &Map<String, Value>, name: &'static str) -> Result<String, Error> {
    match fields.get(name).and_then(Value::as_str) {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(Error::MissingField(name)),
    }
}

fn optional_str(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

/// The side effects one creation event asks for
#[derive(Debug, Clone)]
pub enum ProvisionPlan {
    /// Create an account and write its id back to the record under the key
    Create {
        /// Collection key of the record to update
        user_id: String,

        /// Account creation payload
        request: AccountRequest,
    },

    /// The snapshot already carries an account id; nothing to do
    AlreadyProvisioned {
        /// Collection key of the record
        user_id: String,

        /// The previously assigned account id
        account_id: String,
    },
}

impl ProvisionPlan {
    /// Build the side-effect plan for a newly created record
    ///
    /// The initial password is a random alphanumeric string, never derived
    /// from the record's fields; the user sets a real credential through the
    /// recovery mail sent after provisioning.
    pub fn from_snapshot(
        user_id: &str,
        fields: &Map<String, Value>,
        password_length: usize,
    ) -> Result<Self, Error> {
        let snapshot = UserSnapshot::from_fields(fields)?;

        if let Some(account_id) = snapshot.uid {
            return Ok(ProvisionPlan::AlreadyProvisioned {
                user_id: user_id.to_string(),
                account_id,
            });
        }

        let password = generate_initial_password(password_length);
        let request = AccountRequest::new(&snapshot.email, &password, &snapshot.display_name());

        Ok(ProvisionPlan::Create {
            user_id: user_id.to_string(),
            request,
        })
    }
}

/// Generate a random alphanumeric initial password
pub(crate) fn generate_initial_password(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> Map<String, Value> {
        let value = json!({
            "email": "ana@example.com",
            "cif": "B12345678",
            "name": "Ana",
            "lastName": "Santos"
        });
        value.as_object().unwrap().clone()
    }

    #[test]
    fn snapshot_extracts_identity_fields() {
        let snapshot = UserSnapshot::from_fields(&fields()).unwrap();
        assert_eq!(snapshot.email, "ana@example.com");
        assert_eq!(snapshot.cif, "B12345678");
        assert_eq!(snapshot.display_name(), "Ana Santos");
        assert_eq!(snapshot.uid, None);
    }

    #[test]
    fn absent_field_is_rejected_by_name() {
        let mut incomplete = fields();
        incomplete.remove("lastName");
        match UserSnapshot::from_fields(&incomplete) {
            Err(Error::MissingField(name)) => assert_eq!(name, "lastName"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn blank_field_counts_as_missing() {
        let mut blank = fields();
        blank.insert("email".to_string(), json!("   "));
        assert!(matches!(
            UserSnapshot::from_fields(&blank),
            Err(Error::MissingField("email"))
        ));
    }

    #[test]
    fn non_string_field_counts_as_missing() {
        let mut wrong = fields();
        wrong.insert("cif".to_string(), json!(42));
        assert!(matches!(
            UserSnapshot::from_fields(&wrong),
            Err(Error::MissingField("cif"))
        ));
    }

    #[test]
    fn plan_creates_account_with_display_name() {
        let plan = ProvisionPlan::from_snapshot("u-1", &fields(), 24).unwrap();
        match plan {
            ProvisionPlan::Create { user_id, request } => {
                assert_eq!(user_id, "u-1");
                assert_eq!(request.email, "ana@example.com");
                assert_eq!(request.display_name, "Ana Santos");
            }
            other => panic!("expected Create, got {:?}", other),
        }
    }

    #[test]
    fn password_is_random_and_never_the_cif() {
        let first = match ProvisionPlan::from_snapshot("u-1", &fields(), 24).unwrap() {
            ProvisionPlan::Create { request, .. } => request.password,
            other => panic!("expected Create, got {:?}", other),
        };
        let second = match ProvisionPlan::from_snapshot("u-1", &fields(), 24).unwrap() {
            ProvisionPlan::Create { request, .. } => request.password,
            other => panic!("expected Create, got {:?}", other),
        };

        assert_eq!(first.len(), 24);
        assert_ne!(first, "B12345678");
        assert_ne!(first, second);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn snapshot_with_uid_short_circuits() {
        let mut provisioned = fields();
        provisioned.insert("uid".to_string(), json!("acc-9"));
        let plan = ProvisionPlan::from_snapshot("u-1", &provisioned, 24).unwrap();
        assert!(matches!(
            plan,
            ProvisionPlan::AlreadyProvisioned { ref account_id, .. } if account_id == "acc-9"
        ));
    }
}
