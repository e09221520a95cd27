//! In-memory doubles for the directory and store interfaces.
//!
//! Both doubles enforce the same uniqueness their production counterparts
//! delegate to the external systems, so race-shaped tests can observe
//! conflict errors. Call counters back the call-count assertions in the
//! orchestrator tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::directory::IdentityDirectory;
use crate::error::{AdminError, AdminResult};
use crate::store::RoleStore;
use crate::types::{Identity, NewRoleRecord, RoleRecord};

#[derive(Default)]
pub(crate) struct FakeDirectory {
    identities: Mutex<Vec<Identity>>,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub fail_listing: AtomicBool,
    /// Make the next create fail as if a concurrent invocation had just
    /// registered the same email.
    pub conflict_next_create: AtomicBool,
}

impl FakeDirectory {
    pub fn with_identity(email: &str) -> Self {
        let directory = Self::default();
        directory.seed(email);
        directory
    }

    /// Insert an identity directly, bypassing the counters.
    pub fn seed(&self, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.identities.lock().unwrap().push(Identity {
            id,
            email: email.to_string(),
            email_confirmed: true,
        });
        id
    }

    pub fn identities(&self) -> Vec<Identity> {
        self.identities.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityDirectory for FakeDirectory {
    async fn list_all(&self) -> AdminResult<Vec<Identity>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(AdminError::provider("listing unavailable"));
        }
        Ok(self.identities.lock().unwrap().clone())
    }

    async fn create(
        &self,
        email: &str,
        _password: Option<&str>,
        confirmed: bool,
    ) -> AdminResult<Identity> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.conflict_next_create.swap(false, Ordering::SeqCst) {
            return Err(AdminError::conflict(format!(
                "identity with email '{email}' already exists"
            )));
        }
        let mut identities = self.identities.lock().unwrap();
        if identities.iter().any(|i| i.email == email) {
            // The provider's own uniqueness constraint is the arbiter.
            return Err(AdminError::conflict(format!(
                "identity with email '{email}' already exists"
            )));
        }
        let identity = Identity {
            id: Uuid::new_v4(),
            email: email.to_string(),
            email_confirmed: confirmed,
        };
        identities.push(identity.clone());
        Ok(identity)
    }

    async fn update_credential(&self, id: Uuid, _password: &str) -> AdminResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.identities.lock().unwrap().iter().any(|i| i.id == id) {
            Ok(())
        } else {
            Err(AdminError::provider(format!("no identity with id '{id}'")))
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeStore {
    records: Mutex<Vec<RoleRecord>>,
    pub insert_calls: AtomicUsize,
    pub fail_next_insert: AtomicBool,
    /// Make the next insert fail as if a concurrent invocation had won the
    /// unique-constraint race on the identity reference.
    pub conflict_next_insert: AtomicBool,
}

impl FakeStore {
    /// Insert a record directly, bypassing the counters.
    pub fn seed(&self, identity_id: Uuid, name: &str, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.records.lock().unwrap().push(RoleRecord {
            id,
            identity_id,
            name: name.to_string(),
            email: email.to_string(),
        });
        id
    }

    pub fn records(&self) -> Vec<RoleRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoleStore for FakeStore {
    async fn find_by_identity(&self, identity_id: Uuid) -> AdminResult<Option<RoleRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.identity_id == identity_id)
            .cloned())
    }

    async fn insert(&self, record: NewRoleRecord) -> AdminResult<RoleRecord> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_insert.swap(false, Ordering::SeqCst) {
            return Err(AdminError::store("injected insert failure"));
        }
        if self.conflict_next_insert.swap(false, Ordering::SeqCst) {
            return Err(AdminError::conflict(format!(
                "role record for identity '{}' already exists",
                record.identity_id
            )));
        }
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.identity_id == record.identity_id) {
            // Mirrors the unique constraint on the identity reference.
            return Err(AdminError::conflict(format!(
                "role record for identity '{}' already exists",
                record.identity_id
            )));
        }
        let created = RoleRecord {
            id: Uuid::new_v4(),
            identity_id: record.identity_id,
            name: record.name,
            email: record.email,
        };
        records.push(created.clone());
        Ok(created)
    }
}
