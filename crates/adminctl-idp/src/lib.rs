//! Administrative HTTP client for the identity provider.
//!
//! Implements [`adminctl_core::IdentityDirectory`] against the provider's
//! `/admin/users` surface, authenticated with a bearer service key. All
//! operations are plain request/response; any non-success status is
//! surfaced as a fatal error carrying the provider's own message (and
//! `details`, when the body has one).

mod client;
mod wire;

pub use client::AdminApiClient;
