//! The version-and-push action
//!
//! Runs in the CI checkout: set the committer, let the package manager bump
//! the manifest (which commits and tags), then push unless upstream moved on.

use tracing::info;

use crate::command::CommandRunner;
use crate::config::PackageManager;
use crate::domain::BumpType;
use crate::error::Result;

/// Phrase `git status` prints when the local branch lags its upstream
const BEHIND_MARKER: &str = "is behind";

pub struct Versioner<'a> {
    runner: &'a dyn CommandRunner,
    package_manager: PackageManager,
}

impl<'a> Versioner<'a> {
    pub fn new(runner: &'a dyn CommandRunner, package_manager: PackageManager) -> Self {
        Versioner {
            runner,
            package_manager,
        }
    }

    /// Bump, commit, tag and push.
    ///
    /// # Returns
    /// * `Ok(true)` - the release commit and tags were pushed
    /// * `Ok(false)` - the branch is behind upstream; the local commit and tag are left unpushed
    /// * `Err` - any command exited non-zero
    pub async fn version(&self, bump: BumpType, email: &str, name: &str) -> Result<bool> {
        info!("📒 Setting git config");
        self.runner.run("git", &["config", "user.name", name]).await?;
        self.runner
            .run("git", &["config", "user.email", email])
            .await?;

        info!("🔖 Version {}", bump);
        let args = self.package_manager.version_args(bump);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner
            .run(self.package_manager.program(), &args)
            .await?;

        if self.is_branch_behind().await? {
            return Ok(false);
        }

        info!("📌 Pushing release commit message and tag");
        self.runner.run("git", &["push"]).await?;
        self.runner.run("git", &["push", "--tags"]).await?;
        Ok(true)
    }

    async fn is_branch_behind(&self) -> Result<bool> {
        let status = self.runner.run("git", &["status", "-uno"]).await?;
        Ok(status.contains(BEHIND_MARKER))
    }
}
