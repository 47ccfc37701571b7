//! Main release workflow orchestration
//!
//! Sequences the release gates and the version-and-push action. Each stage
//! can end the run early with a [SkipReason]; any error ends it as a failure.
//! All collaborators are injected, so the workflow runs unchanged against
//! mocks in tests.

use tracing::{info, warn};

use crate::analyzer::{detect_bump_type, ChangeClassifier};
use crate::boundary::SkipReason;
use crate::command::CommandRunner;
use crate::context::ReleaseContext;
use crate::domain::{current_branch, BumpType};
use crate::error::{ReleaseBotError, Result};
use crate::github::{GitHost, RepoAccess};
use crate::history::{has_pending_dependency_prs_open, retrieve_changes_since_last_release};
use crate::manifest::{FileSystem, ManifestReader};
use crate::report::Reporter;
use crate::versioner::Versioner;

/// External capabilities the workflow runs against
pub struct Collaborators<'a> {
    pub host: &'a dyn GitHost,
    pub runner: &'a dyn CommandRunner,
    pub fs: &'a dyn FileSystem,
    pub reporter: &'a dyn Reporter,
}

/// How a run that did not fail ended
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// A release commit and tag were pushed
    Released {
        bump: BumpType,
        /// Predicted new version, when the manifest version is valid semver
        version: Option<String>,
    },
    Skipped(SkipReason),
}

/// Run the release pipeline and report how it ended.
///
/// Skips are reported with their own severity and failures through
/// [Reporter::set_failed]. The outcome is returned so the caller can set the
/// process exit status.
pub async fn run(ctx: &ReleaseContext, deps: &Collaborators<'_>) -> Result<WorkflowOutcome> {
    let result = run_release_workflow(ctx, deps).await;
    match &result {
        Ok(WorkflowOutcome::Skipped(reason)) => {
            deps.reporter.report(reason.severity(), &reason.to_string())
        }
        Ok(WorkflowOutcome::Released { bump, version }) => match version {
            Some(version) => deps.reporter.info(&format!("🚀 Released {}", version)),
            None => deps.reporter.info(&format!("🚀 Released a {}", bump)),
        },
        Err(err) => deps.reporter.set_failed(&err.to_string()),
    }
    result
}

/// The release pipeline without outcome reporting.
///
/// Stages, in order:
/// 1. Require a token
/// 2. Ignore the bot's own version commit
/// 3. Require the `version` input
/// 4. Require the base branch
/// 5. Wait for open dependency PRs
/// 6. Fetch changes since the last release
/// 7. Require a release-worthy change set
/// 8. Detect the bump
/// 9. Version and push
pub async fn run_release_workflow(
    ctx: &ReleaseContext,
    deps: &Collaborators<'_>,
) -> Result<WorkflowOutcome> {
    let credential = ctx
        .options
        .github_token
        .clone()
        .filter(|credential| !credential.expose().is_empty())
        .ok_or(ReleaseBotError::MissingCredential)?;

    if ctx.is_own_version_commit() {
        return Ok(WorkflowOutcome::Skipped(SkipReason::OwnVersionCommit {
            bot: ctx.options.github_user.clone(),
        }));
    }

    if !ctx.inputs.versioning_enabled() {
        return Ok(WorkflowOutcome::Skipped(SkipReason::VersioningDisabled));
    }

    let base_branch = ctx.inputs.base_branch.as_str();
    let branch = current_branch(ctx.options.github_ref.as_deref())?;
    if branch != base_branch {
        return Ok(WorkflowOutcome::Skipped(SkipReason::NotBaseBranch {
            current: branch,
            base: base_branch.to_string(),
        }));
    }

    let repository = ctx
        .repository
        .clone()
        .ok_or_else(|| ReleaseBotError::config("GITHUB_REPOSITORY is not set"))?;
    let access = RepoAccess::new(repository, credential);

    if has_pending_dependency_prs_open(deps.host, &access).await? {
        return Ok(WorkflowOutcome::Skipped(
            SkipReason::PendingDependencyPullRequests,
        ));
    }

    deps.reporter.info("✏️ Retrieving commits since last release");
    let comparison = retrieve_changes_since_last_release(deps.host, &access).await?;
    if comparison.commits.is_empty() {
        return Ok(WorkflowOutcome::Skipped(SkipReason::NoNewCommits));
    }
    for commit in &comparison.commits {
        info!("📦 {}", commit.subject());
    }

    deps.reporter.info("✏️ Checking if changes worth a release");
    let manifest = ManifestReader::new(deps.fs, &ctx.manifest);
    let classifier = ChangeClassifier::new(manifest.dev_dependencies()?);
    if !classifier.are_changes_worth_release(&comparison) {
        return Ok(WorkflowOutcome::Skipped(SkipReason::NotWorthRelease));
    }

    deps.reporter.info("⬆️ Detecting bump type given branch/commit");
    let bump = detect_bump_type(&comparison.commits)?;

    let next_version = predict_version(&manifest, bump)?;
    match &next_version {
        Some((current, next)) => deps
            .reporter
            .info(&format!("🔖 Versioning a {} ({} → {})", bump, current, next)),
        None => deps.reporter.info(&format!("🔖 Versioning a {}", bump)),
    }

    let versioner = Versioner::new(deps.runner, ctx.package_manager);
    if !versioner
        .version(bump, &ctx.options.github_email, &ctx.options.github_user)
        .await?
    {
        return Ok(WorkflowOutcome::Skipped(SkipReason::BranchBehind {
            base: base_branch.to_string(),
        }));
    }

    Ok(WorkflowOutcome::Released {
        bump,
        version: next_version.map(|(_, next)| next),
    })
}

/// Current and next manifest version, or `None` when the current one is
/// missing, not a string, or not semver
fn predict_version(
    manifest: &ManifestReader<'_>,
    bump: BumpType,
) -> Result<Option<(String, String)>> {
    let loaded = manifest.load()?;
    let Some(current) = loaded.version_str().map(str::to_string) else {
        warn!("Manifest has no string version, skipping version preview");
        return Ok(None);
    };
    match semver::Version::parse(&current) {
        Ok(parsed) => Ok(Some((current, bump.next_version(&parsed).to_string()))),
        Err(e) => {
            warn!(version = %current, "Manifest version is not semver: {}", e);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::MockRunner;
    use crate::config::Config;
    use crate::context::PushEvent;
    use crate::domain::{Commit, Comparison, FileChange};
    use crate::github::{Credential, MockGitHost, RepoSlug};
    use crate::manifest::MemoryFileSystem;
    use crate::report::RecordingReporter;

    fn context() -> ReleaseContext {
        let mut ctx = ReleaseContext::from_config(&Config::default());
        ctx.options.github_token = Some(Credential::new("github.token"));
        ctx.options.github_ref = Some("refs/heads/master".to_string());
        ctx.inputs.version = "true".to_string();
        ctx.inputs.base_branch = "master".to_string();
        ctx.repository = Some(RepoSlug::new("jdoe", "foo"));
        ctx
    }

    #[test]
    fn test_version_preview_tolerates_non_semver() {
        let fs = MemoryFileSystem::new().with_file("package.json", r#"{"version": "next"}"#);
        let manifest = ManifestReader::new(&fs, "package.json");
        assert_eq!(predict_version(&manifest, BumpType::Minor).unwrap(), None);
    }

    #[test]
    fn test_version_preview_tolerates_missing_or_non_string_version() {
        for contents in [r#"{"private": true}"#, r#"{"version": 1}"#] {
            let fs = MemoryFileSystem::new().with_file("package.json", contents);
            let manifest = ManifestReader::new(&fs, "package.json");
            assert_eq!(predict_version(&manifest, BumpType::Patch).unwrap(), None);
        }
    }

    #[test]
    fn test_version_preview() {
        let fs = MemoryFileSystem::new().with_file("package.json", r#"{"version": "1.2.3"}"#);
        let manifest = ManifestReader::new(&fs, "package.json");
        assert_eq!(
            predict_version(&manifest, BumpType::Minor).unwrap(),
            Some(("1.2.3".to_string(), "1.3.0".to_string()))
        );
    }

    #[tokio::test]
    async fn test_missing_repository_fails() {
        let mut ctx = context();
        ctx.repository = None;
        let host = MockGitHost::new();
        let runner = MockRunner::new();
        let fs = MemoryFileSystem::new();
        let reporter = RecordingReporter::new();
        let deps = Collaborators {
            host: &host,
            runner: &runner,
            fs: &fs,
            reporter: &reporter,
        };

        let err = run_release_workflow(&ctx, &deps).await.unwrap_err();
        assert!(matches!(err, ReleaseBotError::Config(_)));
    }

    #[tokio::test]
    async fn test_unreadable_manifest_fails_before_versioning() {
        let host = MockGitHost::new()
            .with_commits(vec![Commit::new("abc", ":bug: fix")])
            .with_comparison(Comparison::new(
                vec![Commit::new("abc", ":bug: fix")],
                vec![FileChange::new("src/index.ts")],
            ));
        let runner = MockRunner::new();
        let fs = MemoryFileSystem::new();
        let reporter = RecordingReporter::new();
        let deps = Collaborators {
            host: &host,
            runner: &runner,
            fs: &fs,
            reporter: &reporter,
        };
        let mut ctx = context();
        ctx.event = PushEvent::from_messages(&[":bug: fix"]);

        let err = run(&ctx, &deps).await.unwrap_err();
        assert!(matches!(err, ReleaseBotError::ManifestUnreadable(_)));
        assert!(reporter.has_failed());
        assert!(runner.calls().is_empty());
    }
}
