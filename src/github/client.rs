use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Commit, PullRequestSummary};
use crate::error::{ReleaseBotError, Result};
use crate::github::models::{ApiError, CommitComparison, CommitEntry, PullRequest, Tag};
use crate::github::{GitHost, RefComparison, RepoAccess};

/// Public GitHub API root, overridden by `GITHUB_API_URL` on Enterprise runners
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";

/// [GitHost] backed by the GitHub REST API
pub struct GitHubClient {
    client: Client,
    api_url: String,
}

impl GitHubClient {
    /// Create a client for the API rooted at `api_url`
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("release-bot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GitHubClient {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, access: &RepoAccess, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url, access.repository.owner, access.repository.repo, path
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        access: &RepoAccess,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.repo_url(access, path);
        debug!(%url, "Calling GitHub API");

        let response = self
            .client
            .get(&url)
            .query(query)
            .bearer_auth(access.credential.expose())
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), body));
        }

        Ok(response.json().await?)
    }
}

/// Error for a non-2xx response, preferring the `message` of a JSON error body
fn api_error(status: u16, body: String) -> ReleaseBotError {
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|error| error.message)
        .unwrap_or(body);
    ReleaseBotError::github(status, message)
}

#[async_trait]
impl GitHost for GitHubClient {
    async fn list_tags(&self, access: &RepoAccess, per_page: u8) -> Result<Vec<String>> {
        let per_page = per_page.to_string();
        let tags: Vec<Tag> = self
            .get_json(access, "tags", &[("per_page", per_page.as_str())])
            .await?;
        Ok(tags.into_iter().map(|tag| tag.name).collect())
    }

    async fn list_commits(&self, access: &RepoAccess) -> Result<Vec<Commit>> {
        let commits: Vec<CommitEntry> = self.get_json(access, "commits", &[]).await?;
        Ok(commits.into_iter().map(Commit::from).collect())
    }

    async fn compare(&self, access: &RepoAccess, base: &str, head: &str) -> Result<RefComparison> {
        let path = format!("compare/{}...{}", base, head);
        let body: CommitComparison = self.get_json(access, &path, &[]).await?;
        let diff_url = body.diff_url.clone();
        Ok(RefComparison {
            comparison: body.into_comparison(),
            diff_url,
        })
    }

    async fn list_open_pull_requests(
        &self,
        access: &RepoAccess,
    ) -> Result<Vec<PullRequestSummary>> {
        let pulls: Vec<PullRequest> = self
            .get_json(access, "pulls", &[("state", "open")])
            .await?;
        Ok(pulls.into_iter().map(PullRequestSummary::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{Credential, RepoSlug};

    #[test]
    fn test_repo_url() {
        let client = GitHubClient::new("https://ghe.example.com/api/v3/").unwrap();
        let access = RepoAccess::new(RepoSlug::new("jdoe", "foo"), Credential::new("t"));
        assert_eq!(
            client.repo_url(&access, "compare/v1.0.0...abc"),
            "https://ghe.example.com/api/v3/repos/jdoe/foo/compare/v1.0.0...abc"
        );
    }

    #[test]
    fn test_api_error_uses_json_message() {
        let body = r#"{"message": "Bad credentials", "documentation_url": "https://docs.github.com/rest"}"#;
        match api_error(401, body.to_string()) {
            ReleaseBotError::GitHub { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Bad credentials");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_raw_body() {
        match api_error(502, "<html>Bad Gateway</html>".to_string()) {
            ReleaseBotError::GitHub { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "<html>Bad Gateway</html>");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_api_error_with_empty_body() {
        assert!(matches!(
            api_error(404, String::new()),
            ReleaseBotError::GitHub { status: 404, ref message } if message.is_empty()
        ));
    }
}
