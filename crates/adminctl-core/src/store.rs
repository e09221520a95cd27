//! Role-record store interface.
//!
//! Defines the two operations the orchestrators need from the relational
//! store. The PostgreSQL implementation lives in `adminctl-postgres`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AdminResult;
use crate::types::{NewRoleRecord, RoleRecord};

/// Storage operations for privileged-role records.
///
/// A "no rows" outcome is part of normal control flow and is modeled
/// structurally as `Ok(None)`, never as an error.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Find the role record referencing an identity, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query itself fails.
    async fn find_by_identity(&self, identity_id: Uuid) -> AdminResult<Option<RoleRecord>>;

    /// Insert a new role record and return it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Conflict`](crate::AdminError::Conflict) if the
    /// store's uniqueness constraint on the identity reference rejects the
    /// insert (a resolve/write race), or a store error on any other failure.
    async fn insert(&self, record: NewRoleRecord) -> AdminResult<RoleRecord>;
}
