//! Password-reset orchestrator.
//!
//! A narrower workflow than provisioning: rotate the credential of an
//! existing identity and report on its role record. Never creates an
//! identity or a role record.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::directory::IdentityDirectory;
use crate::error::AdminResult;
use crate::store::RoleStore;
use crate::types::RoleRecord;

/// Terminal state of a password-reset run.
#[derive(Debug, Clone)]
pub enum ResetOutcome {
    /// No identity matched the email. A normal branch, not an error; the
    /// known emails are included so the operator can spot typos.
    NotFound {
        known_emails: Vec<String>,
    },
    /// The credential was rotated. `role_record` is `None` when the
    /// identity has no privileged-role record; worth a warning, but the
    /// rotation itself stands.
    Rotated {
        identity_id: Uuid,
        role_record: Option<RoleRecord>,
    },
}

impl ResetOutcome {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Orchestrates credential rotation for an existing super admin.
pub struct PasswordReset<'a, D, S> {
    directory: &'a D,
    store: &'a S,
}

impl<'a, D, S> PasswordReset<'a, D, S>
where
    D: IdentityDirectory,
    S: RoleStore,
{
    #[must_use]
    pub fn new(directory: &'a D, store: &'a S) -> Self {
        Self { directory, store }
    }

    /// Rotate the credential of the identity matching `email`.
    ///
    /// # Errors
    ///
    /// Fatal on enumeration failure, credential-update rejection, or a
    /// role-record query error. A missing identity or a missing role record
    /// is reported through [`ResetOutcome`], not as an error.
    pub async fn run(&self, email: &str, new_password: &str) -> AdminResult<ResetOutcome> {
        let identities = self.directory.list_all().await?;

        let Some(identity) = identities.iter().find(|i| i.email == email) else {
            debug!(%email, "no identity matches, reporting known emails");
            return Ok(ResetOutcome::NotFound {
                known_emails: identities.into_iter().map(|i| i.email).collect(),
            });
        };

        self.directory
            .update_credential(identity.id, new_password)
            .await?;
        debug!(id = %identity.id, "credential rotated");

        let role_record = self.store.find_by_identity(identity.id).await?;
        if role_record.is_none() {
            warn!(id = %identity.id, "identity has no privileged-role record");
        }

        Ok(ResetOutcome::Rotated {
            identity_id: identity.id,
            role_record,
        })
    }
}
