//! Domain types shared by the resolvers, writers, and orchestrators.

use uuid::Uuid;

/// An account in the external identity provider.
///
/// The provider owns this record; the core only reads it and requests
/// credential changes. The credential itself is never observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque identifier assigned by the provider.
    pub id: Uuid,
    /// Email address, unique within the provider, compared exactly as stored.
    pub email: String,
    /// Whether the email address has been confirmed.
    pub email_confirmed: bool,
}

/// A privileged-role record in the relational store.
///
/// At most one record exists per identity. Existing records are left
/// untouched on re-runs; this core never updates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRecord {
    /// Identifier generated at insert time.
    pub id: Uuid,
    /// The identity this record grants elevated permissions to.
    pub identity_id: Uuid,
    /// Display name of the account holder.
    pub name: String,
    /// Email address, mirrored from the identity for operator convenience.
    pub email: String,
}

/// Fields for a role record about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoleRecord {
    pub identity_id: Uuid,
    pub name: String,
    pub email: String,
}

impl NewRoleRecord {
    /// Build the insert payload for an identity.
    ///
    /// When no name is supplied, the local part of the email (everything
    /// before the first `@`) is used instead.
    #[must_use]
    pub fn new(identity_id: Uuid, name: Option<String>, email: &str) -> Self {
        let name = name.unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string());
        Self {
            identity_id,
            name,
            email: email.to_string(),
        }
    }
}
