use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Entry of `GET /projects?simple=true`; only the id is used.
#[derive(Debug, Deserialize)]
pub struct ProjectSummary {
    pub id: u64,
}

/// Full project record from `GET /projects/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub name_with_namespace: String,
    pub web_url: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentState {
    Available,
    Stopping,
    Stopped,
    #[serde(other)]
    Unknown,
}

/// Entry of `GET /projects/:id/environments`.
#[derive(Debug, Clone, Deserialize)]
pub struct Environment {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub external_url: Option<String>,
    pub state: EnvironmentState,
}

/// A (project id, environment) pair that survived the availability filter.
#[derive(Debug, Clone)]
pub struct AvailableEnvironment {
    pub project_id: u64,
    pub environment: Environment,
}

/// `GET /projects/:id/environments/:environment_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentDetail {
    pub id: u64,
    #[serde(default)]
    pub last_deployment: Option<Deployment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Deployment {
    #[serde(rename = "ref")]
    pub ref_: String,
    #[serde(default)]
    pub deployable: Option<Deployable>,
}

/// The job that performed a deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct Deployable {
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pipeline: Option<PipelineRef>,
    #[serde(default)]
    pub commit: Option<Commit>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineRef {
    pub web_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub id: String,
    pub short_id: String,
    pub author_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub web_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_environment_unknown_state_deserializes() {
        let value = json!({
            "id": 7,
            "name": "review/foo",
            "external_url": null,
            "state": "archived"
        });
        let environment: Environment = serde_json::from_value(value).unwrap();
        assert_eq!(environment.state, EnvironmentState::Unknown);
        assert!(environment.external_url.is_none());
    }

    #[test]
    fn test_environment_detail_without_deployment() {
        let value = json!({
            "id": 11,
            "name": "production",
            "state": "available",
            "last_deployment": null
        });
        let detail: EnvironmentDetail = serde_json::from_value(value).unwrap();
        assert_eq!(detail.id, 11);
        assert!(detail.last_deployment.is_none());
    }

    #[test]
    fn test_environment_detail_with_nested_deployable() {
        let value = json!({
            "id": 11,
            "name": "production",
            "last_deployment": {
                "id": 900,
                "ref": "main",
                "deployable": {
                    "finished_at": "2024-03-01T12:30:00.000Z",
                    "pipeline": { "id": 55, "web_url": "https://gitlab.com/g/p/-/pipelines/55" },
                    "commit": {
                        "id": "0123456789abcdef",
                        "short_id": "01234567",
                        "author_name": "Ada"
                    },
                    "user": {
                        "name": "Grace",
                        "avatar_url": "https://gitlab.com/avatar.png",
                        "web_url": "https://gitlab.com/grace"
                    }
                }
            }
        });
        let detail: EnvironmentDetail = serde_json::from_value(value).unwrap();
        let deployment = detail.last_deployment.unwrap();
        assert_eq!(deployment.ref_, "main");
        let deployable = deployment.deployable.unwrap();
        assert_eq!(deployable.commit.unwrap().short_id, "01234567");
        assert_eq!(deployable.user.unwrap().name, "Grace");
        assert!(deployable.finished_at.is_some());
    }

    #[test]
    fn test_project_without_avatar() {
        let value = json!({
            "id": 1,
            "name": "api",
            "name_with_namespace": "Group / api",
            "web_url": "https://gitlab.com/group/api",
            "avatar_url": null
        });
        let project: Project = serde_json::from_value(value).unwrap();
        assert!(project.avatar_url.is_none());
    }
}
