//! Provisioning orchestrator.
//!
//! Sequences the identity resolver/writer and the role-record
//! resolver/writer into the "ensure a super admin exists with the given
//! credential" workflow. Every write is preceded by a resolve, which is what
//! makes re-runs idempotent: after a partial failure the next run detects
//! what already exists and performs only the missing step.

use tracing::{debug, info};
use uuid::Uuid;

use crate::directory::IdentityDirectory;
use crate::error::AdminResult;
use crate::store::RoleStore;
use crate::types::NewRoleRecord;

/// Input to the provisioning workflow.
#[derive(Debug, Clone)]
pub struct ProvisionRequest {
    /// Email address of the account. Mandatory.
    pub email: String,
    /// Password to set. When absent, an existing identity's credential is
    /// left untouched and a new identity is created without one.
    pub password: Option<String>,
    /// Display name for the role record. Defaults to the email local part.
    pub name: Option<String>,
}

impl ProvisionRequest {
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: None,
            name: None,
        }
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// The action a provisioning run ended up taking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionAction {
    /// A new identity and a new role record were created.
    CreatedBoth,
    /// An existing identity gained a new role record.
    RecordCreated,
    /// Identity and role record both already existed; nothing was written.
    AlreadyProvisioned,
}

impl ProvisionAction {
    /// Returns `true` if nothing was written to the role store.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::AlreadyProvisioned)
    }

    /// Returns `true` if a new identity was created.
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::CreatedBoth)
    }
}

impl std::fmt::Display for ProvisionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreatedBoth => write!(f, "created"),
            Self::RecordCreated => write!(f, "record_created"),
            Self::AlreadyProvisioned => write!(f, "already_provisioned"),
        }
    }
}

/// Final state reported by a successful provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionOutcome {
    /// The identity the role record references.
    pub identity_id: Uuid,
    /// The role record granting elevated permissions.
    pub record_id: Uuid,
    /// Whether the identity was created by this run.
    pub identity_created: bool,
    /// Whether the role record was created by this run.
    pub record_created: bool,
    /// Whether a password was supplied (and therefore is known to the
    /// caller). `false` means the account's credential state is whatever it
    /// already was, or absent for a newly created identity.
    pub password_known: bool,
}

impl ProvisionOutcome {
    #[must_use]
    pub fn action(&self) -> ProvisionAction {
        match (self.identity_created, self.record_created) {
            (true, _) => ProvisionAction::CreatedBoth,
            (false, true) => ProvisionAction::RecordCreated,
            (false, false) => ProvisionAction::AlreadyProvisioned,
        }
    }
}

/// Orchestrates identity and role-record reconciliation.
///
/// Holds its collaborators by reference; construct one per invocation with
/// the production client and store, or with doubles in tests.
pub struct Provisioner<'a, D, S> {
    directory: &'a D,
    store: &'a S,
}

impl<'a, D, S> Provisioner<'a, D, S>
where
    D: IdentityDirectory,
    S: RoleStore,
{
    #[must_use]
    pub fn new(directory: &'a D, store: &'a S) -> Self {
        Self { directory, store }
    }

    /// Ensure exactly one identity and exactly one role record exist for
    /// the requested email, with the credential state the request asked for.
    ///
    /// # Errors
    ///
    /// Any provider or store failure aborts the run. An identity created
    /// before a later failure is left in place; re-running resolves it and
    /// completes only the missing step.
    pub async fn run(&self, request: &ProvisionRequest) -> AdminResult<ProvisionOutcome> {
        // An empty password counts as absent; the credential-update
        // operation is undefined for empty input and must not be reached.
        let password = request.password.as_deref().filter(|p| !p.is_empty());

        let existing = self.directory.find_by_email(&request.email).await?;

        let (identity, identity_created) = match existing {
            Some(identity) => {
                if let Some(password) = password {
                    debug!(id = %identity.id, "identity exists, rotating credential");
                    self.directory
                        .update_credential(identity.id, password)
                        .await?;
                } else {
                    debug!(id = %identity.id, "identity exists, credential untouched");
                }
                (identity, false)
            }
            None => {
                debug!(email = %request.email, "identity absent, creating");
                let identity = self.directory.create(&request.email, password, true).await?;
                (identity, true)
            }
        };

        if let Some(record) = self.store.find_by_identity(identity.id).await? {
            info!(identity = %identity.id, record = %record.id, "role record already present");
            return Ok(ProvisionOutcome {
                identity_id: identity.id,
                record_id: record.id,
                identity_created,
                record_created: false,
                password_known: password.is_some(),
            });
        }

        let record = self
            .store
            .insert(NewRoleRecord::new(
                identity.id,
                request.name.clone(),
                &request.email,
            ))
            .await?;
        info!(identity = %identity.id, record = %record.id, "role record created");

        Ok(ProvisionOutcome {
            identity_id: identity.id,
            record_id: record.id,
            identity_created,
            record_created: true,
            password_known: password.is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeDirectory, FakeStore};

    #[tokio::test]
    async fn test_first_run_creates_identity_and_record() {
        let directory = FakeDirectory::default();
        let store = FakeStore::default();
        let provisioner = Provisioner::new(&directory, &store);

        let outcome = provisioner
            .run(&ProvisionRequest::new("a@x.com").with_password("P1"))
            .await
            .unwrap();

        assert_eq!(outcome.action(), ProvisionAction::CreatedBoth);
        assert!(outcome.identity_created);
        assert!(outcome.record_created);
        assert!(outcome.password_known);

        let identities = directory.identities();
        assert_eq!(identities.len(), 1);
        assert!(identities[0].email_confirmed);

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identity_id, outcome.identity_id);
        assert_eq!(records[0].name, "a");
        assert_eq!(records[0].email, "a@x.com");
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let directory = FakeDirectory::default();
        let store = FakeStore::default();
        let provisioner = Provisioner::new(&directory, &store);

        let first = provisioner
            .run(&ProvisionRequest::new("a@x.com").with_password("P1"))
            .await
            .unwrap();
        let second = provisioner
            .run(&ProvisionRequest::new("a@x.com").with_password("P2"))
            .await
            .unwrap();

        assert_eq!(second.action(), ProvisionAction::AlreadyProvisioned);
        assert_eq!(second.identity_id, first.identity_id);
        assert_eq!(second.record_id, first.record_id);

        // The new password was applied to the existing identity, and the
        // role record was reused unchanged.
        assert_eq!(directory.create_calls(), 1);
        assert_eq!(directory.update_calls(), 1);
        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "a");
    }

    #[tokio::test]
    async fn test_recovers_after_failed_record_insert() {
        let directory = FakeDirectory::default();
        let store = FakeStore::default();
        let provisioner = Provisioner::new(&directory, &store);
        store
            .fail_next_insert
            .store(true, std::sync::atomic::Ordering::SeqCst);

        let request = ProvisionRequest::new("a@x.com").with_password("P1");
        let err = provisioner.run(&request).await.unwrap_err();
        assert!(err.is_store());

        // The identity outlived the failed run; the retry must reuse it and
        // create exactly one record.
        let outcome = provisioner.run(&request).await.unwrap();
        assert_eq!(outcome.action(), ProvisionAction::RecordCreated);
        assert!(!outcome.identity_created);
        assert_eq!(directory.create_calls(), 1);
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn test_no_password_skips_credential_update() {
        let directory = FakeDirectory::default();
        let store = FakeStore::default();
        let id = directory.seed("a@x.com");
        store.seed(id, "a", "a@x.com");
        let provisioner = Provisioner::new(&directory, &store);

        let outcome = provisioner
            .run(&ProvisionRequest::new("a@x.com"))
            .await
            .unwrap();

        assert_eq!(outcome.action(), ProvisionAction::AlreadyProvisioned);
        assert!(!outcome.password_known);
        assert_eq!(directory.update_calls(), 0);
        assert_eq!(store.insert_calls(), 0);
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_password_treated_as_absent() {
        let directory = FakeDirectory::default();
        let store = FakeStore::default();
        directory.seed("a@x.com");
        let provisioner = Provisioner::new(&directory, &store);

        let outcome = provisioner
            .run(&ProvisionRequest::new("a@x.com").with_password(""))
            .await
            .unwrap();

        assert_eq!(directory.update_calls(), 0);
        assert!(!outcome.password_known);
    }

    #[tokio::test]
    async fn test_explicit_name_used_for_record() {
        let directory = FakeDirectory::default();
        let store = FakeStore::default();
        let provisioner = Provisioner::new(&directory, &store);

        provisioner
            .run(&ProvisionRequest::new("a@x.com").with_name("Alice"))
            .await
            .unwrap();

        assert_eq!(store.records()[0].name, "Alice");
    }

    #[tokio::test]
    async fn test_listing_failure_aborts_before_any_write() {
        let directory = FakeDirectory::default();
        let store = FakeStore::default();
        directory
            .fail_listing
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let provisioner = Provisioner::new(&directory, &store);

        let err = provisioner
            .run(&ProvisionRequest::new("a@x.com").with_password("P1"))
            .await
            .unwrap_err();

        assert!(err.is_provider());
        assert_eq!(directory.create_calls(), 0);
        assert_eq!(store.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_create_race_surfaces_provider_conflict() {
        let directory = FakeDirectory::default();
        let store = FakeStore::default();
        directory
            .conflict_next_create
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let provisioner = Provisioner::new(&directory, &store);

        // Another invocation registered the email between our resolve and
        // create; the provider's rejection must surface, not be retried.
        let err = provisioner
            .run(&ProvisionRequest::new("a@x.com").with_password("P1"))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(directory.create_calls(), 1);
        assert_eq!(store.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_insert_race_surfaces_store_conflict() {
        let directory = FakeDirectory::default();
        let store = FakeStore::default();
        store
            .conflict_next_insert
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let provisioner = Provisioner::new(&directory, &store);

        // Another invocation won the unique-constraint race on the identity
        // reference between our resolve and insert.
        let err = provisioner
            .run(&ProvisionRequest::new("a@x.com").with_password("P1"))
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(store.insert_calls(), 1);
    }
}
