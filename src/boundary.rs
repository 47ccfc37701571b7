use std::fmt;

use crate::report::Severity;

/// Benign early exits of the release pipeline.
/// These are not failures; each is reported with its own severity so
/// monitoring can tell a misconfigured run from a quiet one.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The push is the bot's own version commit
    OwnVersionCommit { bot: String },
    /// The `version` input is not `true`
    VersioningDisabled,
    /// Releases are only cut from the base branch
    NotBaseBranch { current: String, base: String },
    /// Dependency-update pull requests are still open
    PendingDependencyPullRequests,
    /// Nothing was committed since the last release
    NoNewCommits,
    /// The changes are dev-only or cosmetic
    NotWorthRelease,
    /// The local branch lags its upstream, so the release was not pushed
    BranchBehind { base: String },
}

impl SkipReason {
    pub fn severity(&self) -> Severity {
        match self {
            SkipReason::VersioningDisabled
            | SkipReason::NotBaseBranch { .. }
            | SkipReason::PendingDependencyPullRequests => Severity::Warning,
            SkipReason::OwnVersionCommit { .. }
            | SkipReason::NoNewCommits
            | SkipReason::NotWorthRelease
            | SkipReason::BranchBehind { .. } => Severity::Info,
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::OwnVersionCommit { bot } => {
                write!(f, "🤖 Skipping, version commit pushed by {}", bot)
            }
            SkipReason::VersioningDisabled => write!(f, "🚩 Skipping version (flag false)"),
            SkipReason::NotBaseBranch { current, base } => {
                write!(
                    f,
                    "🚫 Current branch: {}, releasing only from {}",
                    current, base
                )
            }
            SkipReason::PendingDependencyPullRequests => {
                write!(f, "🚧 Skipping, dependencies PRs found open")
            }
            SkipReason::NoNewCommits => write!(f, "⏩ No commit found since last release"),
            SkipReason::NotWorthRelease => write!(f, "⏩ Skipping the release"),
            SkipReason::BranchBehind { base } => {
                write!(f, "⏩ Skipping this release, branch behind {}", base)
            }
        }
    }
}
