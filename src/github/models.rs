//! Wire types for the GitHub REST endpoints the bot calls

use serde::Deserialize;

use crate::domain::{Commit, Comparison, FileChange, PullRequestSummary};

#[derive(Debug, Deserialize)]
pub struct Tag {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CommitDetail {
    pub message: String,
}

/// Entry of `GET /repos/{owner}/{repo}/commits` and of a comparison's commit list
#[derive(Debug, Deserialize)]
pub struct CommitEntry {
    pub sha: String,
    pub commit: CommitDetail,
}

impl From<CommitEntry> for Commit {
    fn from(entry: CommitEntry) -> Self {
        Commit::new(entry.sha, entry.commit.message)
    }
}

#[derive(Debug, Deserialize)]
pub struct DiffEntry {
    pub filename: String,
    #[serde(default)]
    pub patch: Option<String>,
}

impl From<DiffEntry> for FileChange {
    fn from(entry: DiffEntry) -> Self {
        FileChange {
            filename: entry.filename,
            patch: entry.patch,
        }
    }
}

/// Body of `GET /repos/{owner}/{repo}/compare/{base}...{head}`
#[derive(Debug, Deserialize)]
pub struct CommitComparison {
    pub diff_url: String,
    #[serde(default)]
    pub commits: Vec<CommitEntry>,
    #[serde(default)]
    pub files: Vec<DiffEntry>,
}

impl CommitComparison {
    pub fn into_comparison(self) -> Comparison {
        Comparison::new(
            self.commits.into_iter().map(Commit::from).collect(),
            self.files.into_iter().map(FileChange::from).collect(),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl From<PullRequest> for PullRequestSummary {
    fn from(pr: PullRequest) -> Self {
        PullRequestSummary {
            number: pr.number,
            labels: pr.labels.into_iter().map(|label| label.name).collect(),
        }
    }
}

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub message: String,
}
