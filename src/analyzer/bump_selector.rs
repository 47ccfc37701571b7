use crate::domain::{BumpType, Commit, CommitKind};
use crate::error::{ReleaseBotError, Result};

/// Pick the bump from the subject line of the most recent commit.
///
/// `minor` when the subject mentions `minor` or `feat`, or starts with the
/// feature marker; `patch` otherwise. Major bumps are never inferred.
///
/// # Errors
/// * `NoCommitsAvailable` - if `commits` is empty
pub fn detect_bump_type(commits: &[Commit]) -> Result<BumpType> {
    let last_commit = commits.last().ok_or(ReleaseBotError::NoCommitsAvailable)?;
    let subject = last_commit.subject();

    if subject.contains("minor")
        || subject.contains("feat")
        || subject.starts_with(CommitKind::Feature.marker())
    {
        Ok(BumpType::Minor)
    } else {
        Ok(BumpType::Patch)
    }
}
