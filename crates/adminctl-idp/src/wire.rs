//! Wire types for the provider's administrative API.

use adminctl_core::Identity;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A user record as the admin API returns it.
///
/// Confirmation state comes as a timestamp; the core only cares whether it
/// is set.
#[derive(Debug, Deserialize)]
pub(crate) struct AdminUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub email_confirmed_at: Option<OffsetDateTime>,
}

impl From<AdminUser> for Identity {
    fn from(user: AdminUser) -> Self {
        Identity {
            id: user.id,
            email: user.email,
            email_confirmed: user.email_confirmed_at.is_some(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserList {
    pub users: Vec<AdminUser>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateUserBody<'a> {
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
    pub email_confirm: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateUserBody<'a> {
    pub password: &'a str,
}

/// Error body shape: `msg` (or `message`) plus an optional `details` field,
/// which some endpoints send as a string and others as structured JSON.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    #[serde(alias = "message")]
    pub msg: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn details_text(&self) -> Option<String> {
        match &self.details {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        }
    }
}
