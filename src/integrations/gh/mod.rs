#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
mod client;

pub use client::{CreatedPullRequest, GhClient, RealGhClient};

#[cfg(test)]
pub use client::tests::MockGhClient;

/// Default REST API root for github.com
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Build the pull request endpoint for a repository
///
/// Format: `{api_url}/repos/{owner}/{repo}/pulls`
pub fn pulls_endpoint(api_url: &str, owner: &str, repo: &str) -> String {
    format!("{}/repos/{owner}/{repo}/pulls", api_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulls_endpoint() {
        assert_eq!(
            pulls_endpoint(DEFAULT_API_URL, "acme", "widgets"),
            "https://api.github.com/repos/acme/widgets/pulls"
        );
    }

    #[test]
    fn test_pulls_endpoint_enterprise_trailing_slash() {
        assert_eq!(
            pulls_endpoint("https://github.example.com/api/v3/", "acme", "widgets"),
            "https://github.example.com/api/v3/repos/acme/widgets/pulls"
        );
    }
}
