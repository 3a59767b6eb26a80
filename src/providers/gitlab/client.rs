use std::sync::Arc;

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use url::Url;

use crate::auth::Token;
use crate::error::{DeployDashError, Result};

use super::types::{Environment, EnvironmentDetail, Project, ProjectSummary};

pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 500;

/// Thin client over GitLab's REST API (`/api/v4`).
///
/// Constructed once per run and handed to the provider; it holds no state
/// beyond connection settings.
pub struct GitLabClient {
    client: Client,
    api_url: Url,
    token: Option<Token>,
    semaphore: Arc<Semaphore>,
}

impl GitLabClient {
    pub fn new(
        base_url: &str,
        token: Option<Token>,
        max_concurrent_requests: usize,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("deploydash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DeployDashError::Config(format!("Failed to create HTTP client: {e}")))?;

        // Url::join replaces the last path segment unless it ends with '/'
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        let api_url = Url::parse(&base)
            .map_err(|e| DeployDashError::Config(format!("Invalid base URL: {e}")))?
            .join("api/v4/")
            .map_err(|e| DeployDashError::Config(format!("Invalid API base URL: {e}")))?;

        if max_concurrent_requests == 0 {
            return Err(DeployDashError::Config(
                "max-concurrent-requests must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            client,
            api_url,
            token,
            semaphore: Arc::new(Semaphore::new(max_concurrent_requests)),
        })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// GitLab instance root, e.g. `https://gitlab.com/`
    pub fn instance_url(&self) -> String {
        self.api_url
            .join("../../")
            .map_or_else(|_| self.api_url.to_string(), |url| url.to_string())
    }

    pub fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.token {
            request.bearer_auth(token.as_str())
        } else {
            request
        }
    }

    /// Issue a GET against `path` (relative to `/api/v4/`) and decode the JSON body.
    pub async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| DeployDashError::Concurrency(e.to_string()))?;

        let url = self
            .api_url
            .join(path)
            .map_err(|e| DeployDashError::Config(format!("Invalid request path {path}: {e}")))?;

        debug!("GET {url}");

        let response = self
            .auth_request(self.client.get(url).query(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(DeployDashError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    pub async fn list_projects(
        &self,
        min_access_level: u32,
        per_page: u32,
    ) -> Result<Vec<ProjectSummary>> {
        let query = [
            ("order_by", "last_activity_at".to_string()),
            ("simple", "true".to_string()),
            ("min_access_level", min_access_level.to_string()),
            ("per_page", per_page.to_string()),
        ];
        self.get_json("projects", &query).await
    }

    pub async fn fetch_project(&self, project_id: u64) -> Result<Project> {
        self.get_json(&format!("projects/{project_id}"), &[]).await
    }

    pub async fn fetch_environments(&self, project_id: u64) -> Result<Vec<Environment>> {
        self.get_json(&format!("projects/{project_id}/environments"), &[])
            .await
    }

    pub async fn fetch_environment(
        &self,
        project_id: u64,
        environment_id: u64,
    ) -> Result<EnvironmentDetail> {
        self.get_json(
            &format!("projects/{project_id}/environments/{environment_id}"),
            &[],
        )
        .await
    }
}
