use std::collections::HashMap;

use indexmap::IndexMap;

use crate::dashboard::{CommitSummary, DeploymentSummary, EnvironmentRow, ProjectRow, UserSummary};

use super::links::{commit_url, ref_url};
use super::ordering::EnvironmentOrder;
use super::types::{AvailableEnvironment, Deployment, Environment, EnvironmentDetail, Project};

/// An available environment after the deployment join.
#[derive(Debug, Clone)]
pub struct EnrichedEnvironment {
    pub project_id: u64,
    pub environment: Environment,
    pub deployment: Option<Deployment>,
}

/// Attaches each environment's last deployment by `(project id, environment id)`.
///
/// `details` may arrive in any order and may be missing entries; an
/// environment without a matching detail keeps no deployment.
pub fn join_deployments(
    available: Vec<AvailableEnvironment>,
    details: Vec<(u64, EnvironmentDetail)>,
) -> Vec<EnrichedEnvironment> {
    let mut deployments: HashMap<(u64, u64), Option<Deployment>> = details
        .into_iter()
        .map(|(project_id, detail)| ((project_id, detail.id), detail.last_deployment))
        .collect();

    available
        .into_iter()
        .map(|AvailableEnvironment { project_id, environment }| {
            let deployment = deployments
                .remove(&(project_id, environment.id))
                .flatten();
            EnrichedEnvironment {
                project_id,
                environment,
                deployment,
            }
        })
        .collect()
}

/// Groups environments under their projects and applies the display order.
///
/// Projects keep their listing order and are dropped when no environment
/// survives the ordering policy.
pub fn assemble(
    projects: Vec<Project>,
    environments: Vec<EnrichedEnvironment>,
    order: &EnvironmentOrder,
) -> Vec<ProjectRow> {
    let mut by_project: IndexMap<u64, Vec<EnrichedEnvironment>> = IndexMap::new();
    for env in environments {
        by_project.entry(env.project_id).or_default().push(env);
    }

    projects
        .into_iter()
        .filter_map(|project| {
            let rows: Vec<EnvironmentRow> = by_project
                .swap_remove(&project.id)
                .unwrap_or_default()
                .into_iter()
                .map(|env| environment_row(&project.web_url, env))
                .collect();

            let environments = order.apply(rows);
            if environments.is_empty() {
                return None;
            }

            Some(ProjectRow {
                id: project.id,
                name: project.name,
                name_with_namespace: project.name_with_namespace,
                web_url: project.web_url,
                avatar_url: project.avatar_url,
                environments,
            })
        })
        .collect()
}

fn environment_row(project_web_url: &str, env: EnrichedEnvironment) -> EnvironmentRow {
    EnvironmentRow {
        id: env.environment.id,
        name: env.environment.name,
        external_url: env.environment.external_url,
        project_id: env.project_id,
        deployment: env
            .deployment
            .map(|deployment| deployment_summary(project_web_url, deployment)),
    }
}

fn deployment_summary(project_web_url: &str, deployment: Deployment) -> DeploymentSummary {
    let deployable = deployment.deployable;
    let (finished_at, pipeline, commit, user) = match deployable {
        Some(d) => (d.finished_at, d.pipeline, d.commit, d.user),
        None => (None, None, None, None),
    };

    DeploymentSummary {
        ref_url: ref_url(project_web_url, &deployment.ref_),
        ref_: deployment.ref_,
        pipeline_url: pipeline.map(|p| p.web_url),
        finished_at,
        commit: commit.map(|c| CommitSummary {
            url: commit_url(project_web_url, &c.id),
            id: c.id,
            short_id: c.short_id,
            author_name: c.author_name,
        }),
        triggered_by: user.map(|u| UserSummary {
            name: u.name,
            avatar_url: u.avatar_url,
            web_url: u.web_url,
        }),
    }
}
