use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Commit, Comparison, PullRequestSummary};
use crate::error::{ReleaseBotError, Result};
use crate::github::{GitHost, RefComparison, RepoAccess};

/// Mock host serving canned data and recording the refs it was asked to compare
#[derive(Default)]
pub struct MockGitHost {
    tags: Vec<String>,
    commits: Vec<Commit>,
    comparison: Comparison,
    pull_requests: Vec<PullRequestSummary>,
    failure: Option<String>,
    compared: Mutex<Vec<(String, String)>>,
}

impl MockGitHost {
    /// Create a new empty mock host
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags, newest first
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|tag| tag.to_string()).collect();
        self
    }

    /// Default-branch commits, newest first
    pub fn with_commits(mut self, commits: Vec<Commit>) -> Self {
        self.commits = commits;
        self
    }

    /// Returned by every compare call, whatever the refs
    pub fn with_comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn with_pull_requests(mut self, pull_requests: Vec<PullRequestSummary>) -> Self {
        self.pull_requests = pull_requests;
        self
    }

    /// Make every call fail with a 500 carrying `message`
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// `(base, head)` pairs passed to [GitHost::compare], in call order
    pub fn compared_refs(&self) -> Vec<(String, String)> {
        self.compared
            .lock()
            .map(|compared| compared.clone())
            .unwrap_or_default()
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(ReleaseBotError::github(500, message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GitHost for MockGitHost {
    async fn list_tags(&self, _access: &RepoAccess, per_page: u8) -> Result<Vec<String>> {
        self.check()?;
        Ok(self.tags.iter().take(per_page as usize).cloned().collect())
    }

    async fn list_commits(&self, _access: &RepoAccess) -> Result<Vec<Commit>> {
        self.check()?;
        Ok(self.commits.clone())
    }

    async fn compare(&self, _access: &RepoAccess, base: &str, head: &str) -> Result<RefComparison> {
        self.check()?;
        if let Ok(mut compared) = self.compared.lock() {
            compared.push((base.to_string(), head.to_string()));
        }
        Ok(RefComparison {
            comparison: self.comparison.clone(),
            diff_url: format!("https://github.com/jdoe/foo/compare/{}...{}.diff", base, head),
        })
    }

    async fn list_open_pull_requests(
        &self,
        _access: &RepoAccess,
    ) -> Result<Vec<PullRequestSummary>> {
        self.check()?;
        Ok(self.pull_requests.clone())
    }
}
