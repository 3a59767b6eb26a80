use crate::dashboard::EnvironmentRow;

pub const DEFAULT_ENVIRONMENT_ORDER: [&str; 4] =
    ["production", "staging", "feature", "feature-marketing"];

/// Inclusion list and display priority for environment names.
///
/// Environments whose name is not listed are hidden, the rest are shown in
/// list order. Equal names keep the order they were fetched in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentOrder {
    names: Vec<String>,
}

impl Default for EnvironmentOrder {
    fn default() -> Self {
        Self::new(DEFAULT_ENVIRONMENT_ORDER.iter().map(ToString::to_string))
    }
}

impl EnvironmentOrder {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn rank(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn apply(&self, environments: Vec<EnvironmentRow>) -> Vec<EnvironmentRow> {
        let mut ranked: Vec<(usize, EnvironmentRow)> = environments
            .into_iter()
            .filter_map(|env| self.rank(&env.name).map(|rank| (rank, env)))
            .collect();

        // sort_by_key is stable
        ranked.sort_by_key(|(rank, _)| *rank);

        ranked.into_iter().map(|(_, env)| env).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(id: u64, name: &str) -> EnvironmentRow {
        EnvironmentRow {
            id,
            name: name.to_string(),
            external_url: None,
            project_id: 1,
            deployment: None,
        }
    }

    fn names(rows: &[EnvironmentRow]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_unlisted_environments_are_excluded() {
        let order = EnvironmentOrder::default();
        let rows = order.apply(vec![env(1, "production"), env(2, "review/foo")]);
        assert_eq!(names(&rows), vec!["production"]);
    }

    #[test]
    fn test_environments_sorted_by_priority() {
        let order = EnvironmentOrder::default();
        let rows = order.apply(vec![
            env(1, "feature-marketing"),
            env(2, "staging"),
            env(3, "feature"),
            env(4, "production"),
        ]);
        assert_eq!(
            names(&rows),
            vec!["production", "staging", "feature", "feature-marketing"]
        );
    }

    #[test]
    fn test_ties_keep_original_order() {
        let order = EnvironmentOrder::default();
        let rows = order.apply(vec![env(7, "staging"), env(3, "production"), env(5, "staging")]);
        let ids: Vec<u64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 7, 5]);
    }

    #[test]
    fn test_custom_order() {
        let order = EnvironmentOrder::new(vec!["qa".to_string(), "prod".to_string()]);
        let rows = order.apply(vec![env(1, "prod"), env(2, "production"), env(3, "qa")]);
        assert_eq!(names(&rows), vec!["qa", "prod"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(EnvironmentOrder::default().apply(Vec::new()).is_empty());
    }
}
