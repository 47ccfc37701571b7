//! Release history retrieval and the pending dependency PR gate

use tracing::info;

use crate::domain::Comparison;
use crate::error::Result;
use crate::github::{GitHost, RepoAccess};

/// Label automated dependency-update tooling puts on its pull requests
pub const DEPENDENCIES_LABEL: &str = "dependencies";

/// Fetch what changed between the last release and the head of the default branch.
///
/// The base is the most recent tag, or the oldest commit of the first page of
/// history when the repository has never been tagged. On a history longer
/// than one page that commit is not the root, so the range is truncated.
/// Head is the newest commit. An empty history yields an empty comparison.
pub async fn retrieve_changes_since_last_release(
    host: &dyn GitHost,
    access: &RepoAccess,
) -> Result<Comparison> {
    let tags = host.list_tags(access, 1).await?;
    let last_commits = host.list_commits(access).await?;

    let (Some(newest), Some(oldest)) = (last_commits.first(), last_commits.last()) else {
        return Ok(Comparison::default());
    };
    let head = newest.sha.as_str();
    let base = tags.first().map(String::as_str).unwrap_or(oldest.sha.as_str());

    info!("🏷 Retrieving commits since {}", base);
    let result = host.compare(access, base, head).await?;
    info!("🔗 Diff url : {}", result.diff_url);
    Ok(result.comparison)
}

/// Whether an open pull request carries the [DEPENDENCIES_LABEL]
pub async fn has_pending_dependency_prs_open(
    host: &dyn GitHost,
    access: &RepoAccess,
) -> Result<bool> {
    let open_prs = host.list_open_pull_requests(access).await?;
    Ok(open_prs.iter().any(|pr| pr.has_label(DEPENDENCIES_LABEL)))
}
