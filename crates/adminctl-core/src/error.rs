//! Error taxonomy for the provisioning workflows.
//!
//! Every variant is fatal for the invocation that produced it; there is no
//! partial rollback. A "no rows" result from the store is not an error at
//! all: resolvers return `Option` for that branch.

/// Errors that can occur while reconciling the identity provider and the
/// role-record store.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// The identity provider failed or rejected a request.
    #[error("identity provider error: {message}")]
    Provider {
        /// Human-readable message from the provider.
        message: String,
        /// Additional detail the provider sometimes attaches.
        details: Option<String>,
    },

    /// The relational store failed a query (anything other than "no rows").
    #[error("store error: {0}")]
    Store(String),

    /// A uniqueness constraint rejected a write.
    ///
    /// Signals a concurrent invocation racing past the resolve step; the
    /// external store is the arbiter. Must never be retried automatically.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl AdminError {
    /// Create a `Provider` error without details.
    #[must_use]
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            details: None,
        }
    }

    /// Create a `Provider` error carrying the provider's detail field.
    #[must_use]
    pub fn provider_with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Create a `Store` error.
    #[must_use]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Create a `Conflict` error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Returns `true` if this is a provider error.
    #[must_use]
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }

    /// Returns `true` if this is a store error.
    #[must_use]
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Returns `true` if this is a uniqueness-constraint conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// The provider's detail field, when present.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::Provider { details, .. } => details.as_deref(),
            _ => None,
        }
    }
}

/// Result type for reconciliation operations.
pub type AdminResult<T> = Result<T, AdminError>;
