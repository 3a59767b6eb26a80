use chrono::Utc;
use futures::future::join_all;
use log::{debug, info, warn};

use crate::dashboard::{Dashboard, LoadingStatus};
use crate::error::Result;

use super::assemble::{self, EnrichedEnvironment};
use super::client::GitLabClient;
use super::ordering::EnvironmentOrder;
use super::types::{AvailableEnvironment, EnvironmentState, Project};

pub const DEFAULT_MIN_ACCESS_LEVEL: u32 = 10;
pub const DEFAULT_PER_PAGE: u32 = 1000;

/// Parameters of the initial project listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOptions {
    /// GitLab access level (10 = guest, 20 = reporter, 30 = developer, ...)
    pub min_access_level: u32,
    /// Page size; only the first page is read
    pub per_page: u32,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            min_access_level: DEFAULT_MIN_ACCESS_LEVEL,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// GitLab deployment aggregator.
///
/// Builds the dashboard in three strictly sequential stages, each fanning
/// out one request per item of the previous stage's output:
/// 1. projects (listing, then per-project detail)
/// 2. environments per project, filtered to `available`
/// 3. environment detail per available environment, joined by id
///
/// Only the project listing is fatal. Every per-item failure is logged and
/// degrades that item: a missing project detail skips the project, a failed
/// environment list yields no environments, a failed environment detail
/// leaves the environment without deployment.
pub struct GitLabProvider {
    pub client: GitLabClient,
    pub listing: ListingOptions,
    pub order: EnvironmentOrder,
}

impl GitLabProvider {
    pub fn new(client: GitLabClient, listing: ListingOptions, order: EnvironmentOrder) -> Self {
        Self {
            client,
            listing,
            order,
        }
    }

    /// Lists accessible projects by last activity and fetches each one's details.
    ///
    /// # Errors
    ///
    /// Returns an error if the project listing request fails.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let summaries = self
            .client
            .list_projects(self.listing.min_access_level, self.listing.per_page)
            .await?;

        info!("Fetching details for {} projects...", summaries.len());

        let results = join_all(
            summaries
                .iter()
                .map(|summary| self.client.fetch_project(summary.id)),
        )
        .await;

        let projects: Vec<Project> = summaries
            .iter()
            .zip(results)
            .filter_map(|(summary, result)| match result {
                Ok(project) => Some(project),
                Err(e) => {
                    warn!("Skipping project {}: {e}", summary.id);
                    None
                }
            })
            .collect();

        info!("Fetched {} projects", projects.len());

        Ok(projects)
    }

    /// Fetches every project's environments and keeps the available ones.
    pub async fn resolve_environments(&self, projects: &[Project]) -> Vec<AvailableEnvironment> {
        let results = join_all(
            projects
                .iter()
                .map(|project| self.client.fetch_environments(project.id)),
        )
        .await;

        let available: Vec<AvailableEnvironment> = projects
            .iter()
            .zip(results)
            .flat_map(|(project, result)| {
                let environments = result.unwrap_or_else(|e| {
                    warn!(
                        "Failed to fetch environments for project {}: {e}",
                        project.id
                    );
                    Vec::new()
                });
                environments
                    .into_iter()
                    .map(move |environment| AvailableEnvironment {
                        project_id: project.id,
                        environment,
                    })
            })
            .filter(|env| env.environment.state == EnvironmentState::Available)
            .collect();

        info!("Found {} available environments", available.len());

        available
    }

    /// Fetches the detail of every environment and joins its last deployment.
    pub async fn join_deployments(
        &self,
        available: Vec<AvailableEnvironment>,
    ) -> Vec<EnrichedEnvironment> {
        let results = join_all(available.iter().map(|env| async move {
            let detail = self
                .client
                .fetch_environment(env.project_id, env.environment.id)
                .await;
            (env.project_id, env.environment.id, detail)
        }))
        .await;

        let details = results
            .into_iter()
            .filter_map(|(project_id, environment_id, result)| match result {
                Ok(detail) => Some((project_id, detail)),
                Err(e) => {
                    warn!(
                        "Failed to fetch environment {environment_id} of project {project_id}: {e}"
                    );
                    None
                }
            })
            .collect();

        assemble::join_deployments(available, details)
    }

    /// Runs all stages and assembles the dashboard.
    ///
    /// `on_status` is called with each stage as it starts and with
    /// [`LoadingStatus::Done`] once the dashboard is assembled.
    ///
    /// # Errors
    ///
    /// Returns an error if the project listing request fails; no partial
    /// dashboard is produced in that case.
    pub async fn collect_dashboard(
        &self,
        mut on_status: impl FnMut(LoadingStatus),
    ) -> Result<Dashboard> {
        info!(
            "Starting deployment collection from {}",
            self.client.api_url()
        );
        debug!("Environment order: {:?}", self.order.names());

        on_status(LoadingStatus::Projects);
        let projects = self.list_projects().await?;

        on_status(LoadingStatus::Environments);
        let available = self.resolve_environments(&projects).await;

        on_status(LoadingStatus::Deployments);
        let environments = self.join_deployments(available).await;

        let rows = assemble::assemble(projects, environments, &self.order);
        if rows.is_empty() {
            warn!("No project has a displayable environment");
        }

        on_status(LoadingStatus::Done);

        Ok(Dashboard {
            gitlab_url: self.client.instance_url(),
            collected_at: Utc::now(),
            projects: rows,
        })
    }
}
