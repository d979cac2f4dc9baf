// ABOUTME: reqwest-backed GitHub REST client for deployment lookups.
// ABOUTME: One authenticated GET per call; errors are mapped and returned, never retried.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;

use super::error::ApiError;
use super::models::{Deployment, DeploymentStatus};
use super::source::DeploymentSource;
use crate::types::{DeploymentId, Reference, RepoName};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size used for deployment listings. Only the first page is read.
pub const DEPLOYMENTS_PAGE_SIZE: u32 = 100;

const API_VERSION: &str = "2022-11-28";

/// GitHub API client scoped to one repository.
#[derive(Clone)]
pub struct GitHubClient {
    base_url: String,
    repo: RepoName,
    client: Client,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Build a client authenticating with `token` against `base_url`.
    pub fn new(base_url: &str, repo: RepoName, token: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("deploy-wait/", env!("CARGO_PKG_VERSION"))),
        );

        if !token.is_empty() {
            let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::InvalidConfig("token contains invalid characters".into()))?;
            auth.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth);
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self::with_client(base_url, repo, client))
    }

    /// Use a preconfigured reqwest client (timeouts, proxies, headers).
    pub fn with_client(base_url: &str, repo: RepoName, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            repo,
            client,
        }
    }

    fn deployments_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/deployments",
            self.base_url,
            self.repo.owner(),
            self.repo.name()
        )
    }

    fn statuses_url(&self, id: DeploymentId) -> String {
        format!("{}/{}/statuses", self.deployments_url(), id)
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let url = response.url().to_string();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::status(status.as_u16(), error_message(&body, status)));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            url,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl DeploymentSource for GitHubClient {
    async fn list_deployments(&self, reference: &Reference) -> Result<Vec<Deployment>, ApiError> {
        tracing::debug!(%reference, repo = %self.repo, "listing deployments");

        let response = self
            .client
            .get(self.deployments_url())
            .query(&[
                ("ref", reference.as_str().to_string()),
                ("per_page", DEPLOYMENTS_PAGE_SIZE.to_string()),
            ])
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn latest_status(&self, id: DeploymentId) -> Result<Option<DeploymentStatus>, ApiError> {
        tracing::debug!(deployment = %id, "fetching latest deployment status");

        // Statuses come back newest first.
        let response = self
            .client
            .get(self.statuses_url(id))
            .query(&[("per_page", "1")])
            .send()
            .await?;

        let statuses: Vec<DeploymentStatus> = self.handle_response(response).await?;
        Ok(statuses.into_iter().next())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pull GitHub's `message` field out of an error body, else use the reason phrase.
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        })
}
