use adminctl_core::{AdminError, AdminResult, Identity, IdentityDirectory};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::wire::{AdminUser, ApiError, CreateUserBody, UpdateUserBody, UserList};

/// The admin listing has no direct lookup; it is paged. The privileged
/// population this tool manages is small, so one large page always covers
/// the full enumeration.
const LIST_PAGE_SIZE: &str = "1000";

/// Client for the identity provider's administrative interface.
pub struct AdminApiClient {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl AdminApiClient {
    #[must_use]
    pub fn new(base_url: &str, service_key: impl Into<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            service_key: service_key.into(),
        }
    }

    fn admin_url(&self, path: &str) -> String {
        format!("{}/admin/{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.service_key)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> AdminResult<reqwest::Response> {
        let resp = req
            .send()
            .await
            .map_err(|e| AdminError::provider(format!("request failed: {e}")))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        Err(error_from_response(status, resp).await)
    }
}

/// Extract the provider's message (and `details`, if any) from an error
/// body. A 409 means another invocation won a race on a uniqueness
/// constraint and maps to the distinct conflict variant.
async fn error_from_response(status: StatusCode, resp: reqwest::Response) -> AdminError {
    let body = resp.text().await.unwrap_or_default();

    let (message, details) = match serde_json::from_str::<ApiError>(&body) {
        Ok(err) => {
            let details = err.details_text();
            (
                err.msg.unwrap_or_else(|| format!("HTTP {status}")),
                details,
            )
        }
        Err(_) => (format!("HTTP {status}: {body}"), None),
    };

    if status == StatusCode::CONFLICT {
        return AdminError::conflict(message);
    }
    AdminError::Provider { message, details }
}

#[async_trait]
impl IdentityDirectory for AdminApiClient {
    #[instrument(skip(self))]
    async fn list_all(&self) -> AdminResult<Vec<Identity>> {
        let url = self.admin_url("users");
        let resp = self
            .send(
                self.request(reqwest::Method::GET, &url)
                    .query(&[("per_page", LIST_PAGE_SIZE)]),
            )
            .await?;

        let list: UserList = resp
            .json()
            .await
            .map_err(|e| AdminError::provider(format!("invalid listing response: {e}")))?;
        debug!(count = list.users.len(), "listed identities");
        Ok(list.users.into_iter().map(Identity::from).collect())
    }

    #[instrument(skip(self, password))]
    async fn create(
        &self,
        email: &str,
        password: Option<&str>,
        confirmed: bool,
    ) -> AdminResult<Identity> {
        let url = self.admin_url("users");
        let body = CreateUserBody {
            email,
            password,
            email_confirm: confirmed,
        };
        let resp = self
            .send(self.request(reqwest::Method::POST, &url).json(&body))
            .await?;

        let user: AdminUser = resp
            .json()
            .await
            .map_err(|e| AdminError::provider(format!("invalid create response: {e}")))?;
        debug!(id = %user.id, "identity created");
        Ok(Identity::from(user))
    }

    #[instrument(skip(self, password))]
    async fn update_credential(&self, id: Uuid, password: &str) -> AdminResult<()> {
        let url = self.admin_url(&format!("users/{id}"));
        self.send(
            self.request(reqwest::Method::PUT, &url)
                .json(&UpdateUserBody { password }),
        )
        .await?;
        debug!(%id, "credential updated");
        Ok(())
    }
}
