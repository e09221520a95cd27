//! Reconciliation core for super-admin provisioning.
//!
//! Keeps two independently-owned stores consistent for a small set of
//! privileged accounts:
//!
//! - an **identity provider** that owns credentials (email/password,
//!   confirmation state), reached through its administrative interface;
//! - a **relational store** that owns the privileged-role assignment record
//!   linking an identity to elevated permissions.
//!
//! Both workflows are idempotent: they resolve before every write, so a
//! re-run after a partial failure completes only the missing step and never
//! produces duplicate identities or duplicate role records. Correctness
//! under concurrent invocation is delegated to the external stores'
//! uniqueness constraints; a constraint rejection surfaces as
//! [`AdminError::Conflict`] and is never retried.
//!
//! # Example
//!
//! ```ignore
//! use adminctl_core::{Provisioner, ProvisionRequest};
//!
//! let provisioner = Provisioner::new(&directory, &store);
//! let outcome = provisioner
//!     .run(&ProvisionRequest::new("root@example.com").with_password("s3cret"))
//!     .await?;
//! println!("provisioned: {}", outcome.action());
//! ```

pub mod directory;
pub mod error;
pub mod provision;
pub mod reset;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use directory::IdentityDirectory;
pub use error::{AdminError, AdminResult};
pub use provision::{ProvisionAction, ProvisionOutcome, ProvisionRequest, Provisioner};
pub use reset::{PasswordReset, ResetOutcome};
pub use store::RoleStore;
pub use types::{Identity, NewRoleRecord, RoleRecord};
