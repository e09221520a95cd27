//! Identity provider administrative interface.
//!
//! Defines the operations the orchestrators need from the identity
//! provider. The HTTP implementation lives in `adminctl-idp`; tests inject
//! in-memory doubles.

use async_trait::async_trait;

use crate::error::AdminResult;
use crate::types::Identity;
use uuid::Uuid;

/// Administrative operations on the identity provider.
///
/// All operations are request/response; any failure is fatal for the
/// workflow that issued it and is never retried.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Enumerate every identity known to the provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is unavailable or rejects the
    /// request.
    async fn list_all(&self) -> AdminResult<Vec<Identity>>;

    /// Create a new identity.
    ///
    /// `confirmed` requests the email be marked confirmed immediately,
    /// skipping the verification round-trip. `password` may be absent; the
    /// provider then creates the account without a usable credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the request, including a
    /// conflict when another invocation created the email concurrently.
    async fn create(
        &self,
        email: &str,
        password: Option<&str>,
        confirmed: bool,
    ) -> AdminResult<Identity>;

    /// Change the credential of an existing identity.
    ///
    /// Callers must skip this call entirely when they have no password to
    /// set; an empty credential is not a defined request.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the change.
    async fn update_credential(&self, id: Uuid, password: &str) -> AdminResult<()>;

    /// Resolve an identity by exact email match.
    ///
    /// The provider offers no direct lookup, so this scans the full
    /// enumeration. Acceptable: invocation is human-driven and the
    /// privileged population is small.
    ///
    /// # Errors
    ///
    /// Returns an error if the enumeration fails.
    async fn find_by_email(&self, email: &str) -> AdminResult<Option<Identity>> {
        let identities = self.list_all().await?;
        Ok(identities.into_iter().find(|i| i.email == email))
    }
}
