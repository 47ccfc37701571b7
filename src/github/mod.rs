//! Repository host abstraction
//!
//! The release pipeline talks to its host only through the [GitHost] trait.
//! The concrete implementations are:
//!
//! - [client::GitHubClient]: the GitHub REST API over `reqwest`
//! - [mock::MockGitHost]: canned responses for tests
//!
//! Every call is keyed by a [RepoAccess], which pairs the `owner/repo` slug
//! with the token used to authenticate.

pub mod client;
pub mod mock;
pub mod models;

pub use client::GitHubClient;
pub use mock::MockGitHost;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::domain::{Commit, Comparison, PullRequestSummary};
use crate::error::{ReleaseBotError, Result};

/// `owner/repo` identifying a hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepoSlug {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl FromStr for RepoSlug {
    type Err = ReleaseBotError;

    fn from_str(value: &str) -> Result<Self> {
        match value.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(RepoSlug::new(owner, repo))
            }
            _ => Err(ReleaseBotError::config(format!(
                "Invalid repository '{}', expected owner/repo",
                value
            ))),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Opaque API token, redacted from debug output
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Credential(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// A repository plus the credential used to reach it
#[derive(Debug, Clone)]
pub struct RepoAccess {
    pub repository: RepoSlug,
    pub credential: Credential,
}

impl RepoAccess {
    pub fn new(repository: RepoSlug, credential: Credential) -> Self {
        RepoAccess {
            repository,
            credential,
        }
    }
}

/// Result of comparing two refs on the host
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefComparison {
    pub comparison: Comparison,
    pub diff_url: String,
}

/// Read-only operations the release pipeline needs from the repository host
///
/// ## Ordering
///
/// [GitHost::list_tags] and [GitHost::list_commits] return the host's order,
/// newest first. [GitHost::compare] returns its commits oldest first.
#[async_trait]
pub trait GitHost: Send + Sync {
    /// Tag names, newest first, at most `per_page` of them
    async fn list_tags(&self, access: &RepoAccess, per_page: u8) -> Result<Vec<String>>;

    /// Commits on the default branch, newest first (one page)
    async fn list_commits(&self, access: &RepoAccess) -> Result<Vec<Commit>>;

    /// Commits and changed files between `base` and `head`
    async fn compare(&self, access: &RepoAccess, base: &str, head: &str) -> Result<RefComparison>;

    /// Pull requests that are still open
    async fn list_open_pull_requests(
        &self,
        access: &RepoAccess,
    ) -> Result<Vec<PullRequestSummary>>;
}
