use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Render-ready snapshot of deployments across all visible projects.
#[derive(Debug, Serialize, Deserialize)]
pub struct Dashboard {
    pub gitlab_url: String,
    pub collected_at: DateTime<Utc>,
    pub projects: Vec<ProjectRow>,
}

/// A project together with its displayed environments, in priority order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: u64,
    pub name: String,
    pub name_with_namespace: String,
    pub web_url: String,
    pub avatar_url: Option<String>,
    pub environments: Vec<EnvironmentRow>,
}

/// An available environment, optionally carrying its last deployment.
///
/// An environment without a deployment is still shown, as an empty row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentRow {
    pub id: u64,
    pub name: String,
    pub external_url: Option<String>,
    pub project_id: u64,
    pub deployment: Option<DeploymentSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentSummary {
    /// Branch or tag that was deployed
    #[serde(rename = "ref")]
    pub ref_: String,
    /// Link to the deployed ref in the project's repository browser
    pub ref_url: String,
    pub pipeline_url: Option<String>,
    pub finished_at: Option<DateTime<Utc>>,
    pub commit: Option<CommitSummary>,
    pub triggered_by: Option<UserSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub id: String,
    pub short_id: String,
    pub author_name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub name: String,
    pub avatar_url: Option<String>,
    pub web_url: String,
}

/// Coarse progress of an aggregation run, for display only.
///
/// Variants are declared in the order a run passes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingStatus {
    Projects,
    Environments,
    Deployments,
    Done,
}

impl fmt::Display for LoadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Projects => "projects",
            Self::Environments => "environments",
            Self::Deployments => "deployments",
            Self::Done => "done",
        };
        f.write_str(label)
    }
}
