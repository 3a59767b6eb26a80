/// Builds a link to a branch or tag in the project's repository browser.
///
/// # Arguments
///
/// * `project_web_url` - Project web URL (e.g., <https://gitlab.com/group/project>)
/// * `ref_` - Branch or tag name (e.g., "main")
///
/// # Returns
///
/// Clickable URL to the ref (e.g., <https://gitlab.com/group/project/tree/main>)
pub fn ref_url(project_web_url: &str, ref_: &str) -> String {
    format!("{}/tree/{ref_}", trim_slash(project_web_url))
}

/// Builds a link to a commit page.
///
/// Clickable URL to the commit (e.g., <https://gitlab.com/group/project/commit/0a1b2c>)
pub fn commit_url(project_web_url: &str, sha: &str) -> String {
    format!("{}/commit/{sha}", trim_slash(project_web_url))
}

fn trim_slash(url: &str) -> &str {
    url.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_url() {
        assert_eq!(
            ref_url("https://gitlab.com/group/project", "release/1.2"),
            "https://gitlab.com/group/project/tree/release/1.2"
        );
    }

    #[test]
    fn test_commit_url() {
        assert_eq!(
            commit_url("https://gitlab.com/group/project", "abc123"),
            "https://gitlab.com/group/project/commit/abc123"
        );
    }

    #[test]
    fn test_trailing_slash_is_not_doubled() {
        assert_eq!(
            ref_url("https://gitlab.com/group/project/", "main"),
            "https://gitlab.com/group/project/tree/main"
        );
    }
}
