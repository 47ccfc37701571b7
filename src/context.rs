//! Explicit run context
//!
//! Everything the pipeline knows about the triggering CI run is gathered into
//! a [ReleaseContext] before the run starts and passed in by value.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::{Config, PackageManager};
use crate::domain::CommitKind;
use crate::error::{ReleaseBotError, Result};
use crate::github::{Credential, RepoSlug};

/// Invocation options recognised by the bot
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Full ref that triggered the run, e.g. `refs/heads/master`
    pub github_ref: Option<String>,
    pub github_token: Option<Credential>,
    /// Committer email for the release commit
    pub github_email: String,
    /// Committer name for the release commit, and the bot actor
    pub github_user: String,
}

/// Workflow inputs, kept as the raw strings the CI passes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionInputs {
    pub version: String,
    pub base_branch: String,
}

impl ActionInputs {
    /// Only the literal `true` enables versioning
    pub fn versioning_enabled(&self) -> bool {
        self.version == "true"
    }
}

/// A commit listed in the push event payload
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PushedCommit {
    #[serde(default)]
    pub id: String,
    pub message: String,
}

/// The part of the push event payload the bot reads
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PushEvent {
    #[serde(default)]
    pub commits: Vec<PushedCommit>,
}

impl PushEvent {
    pub fn from_messages(messages: &[&str]) -> Self {
        PushEvent {
            commits: messages
                .iter()
                .map(|message| PushedCommit {
                    id: String::new(),
                    message: message.to_string(),
                })
                .collect(),
        }
    }

    /// Parse the JSON event payload the runner writes to `GITHUB_EVENT_PATH`
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            ReleaseBotError::config(format!("Invalid event payload {}: {}", path.display(), e))
        })
    }
}

/// Run values from the command line or environment.
///
/// An empty value counts as unset, so the file or default value stays.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub github_ref: Option<String>,
    pub github_token: Option<String>,
    pub github_email: Option<String>,
    pub github_user: Option<String>,
    pub actor: Option<String>,
    pub repository: Option<String>,
    pub version: Option<String>,
    pub base_branch: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// Everything a single pipeline run needs to know about its invocation
#[derive(Debug, Clone)]
pub struct ReleaseContext {
    pub options: RunOptions,
    pub inputs: ActionInputs,
    /// Login of whoever triggered the run
    pub actor: Option<String>,
    pub event: PushEvent,
    pub repository: Option<RepoSlug>,
    pub manifest: PathBuf,
    pub package_manager: PackageManager,
}

impl ReleaseContext {
    /// Context with the identity and release settings of `config` and no run data
    pub fn from_config(config: &Config) -> Self {
        ReleaseContext {
            options: RunOptions {
                github_ref: None,
                github_token: None,
                github_email: config.identity.email.clone(),
                github_user: config.identity.name.clone(),
            },
            inputs: ActionInputs {
                version: String::new(),
                base_branch: config.release.base_branch.clone().unwrap_or_default(),
            },
            actor: None,
            event: PushEvent::default(),
            repository: None,
            manifest: config.release.manifest.clone(),
            package_manager: config.release.package_manager,
        }
    }

    /// Layer command line and environment values over the file configuration.
    ///
    /// # Errors
    /// * `Config` - if the repository is not shaped `owner/repo`
    pub fn apply_overrides(&mut self, overrides: RunOverrides) -> Result<()> {
        self.options.github_ref = non_empty(overrides.github_ref);
        self.options.github_token = non_empty(overrides.github_token).map(Credential::new);
        if let Some(email) = non_empty(overrides.github_email) {
            self.options.github_email = email;
        }
        if let Some(user) = non_empty(overrides.github_user) {
            self.options.github_user = user;
        }
        self.inputs.version = overrides.version.unwrap_or_default();
        if let Some(base_branch) = non_empty(overrides.base_branch) {
            self.inputs.base_branch = base_branch;
        }
        self.actor = non_empty(overrides.actor);
        self.repository = non_empty(overrides.repository)
            .map(|repository| repository.parse::<RepoSlug>())
            .transpose()?;
        Ok(())
    }

    /// Whether this run was triggered by the bot pushing its own version commit.
    ///
    /// True only for a single-commit push whose message starts with the
    /// version bump marker and whose actor is the bot identity.
    pub fn is_own_version_commit(&self) -> bool {
        match self.event.commits.as_slice() {
            [commit] => {
                commit.message.starts_with(CommitKind::VersionBump.marker())
                    && self.actor.as_deref() == Some(self.options.github_user.as_str())
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn context(actor: &str, messages: &[&str]) -> ReleaseContext {
        let mut ctx = ReleaseContext::from_config(&Config::default());
        ctx.actor = Some(actor.to_string());
        ctx.event = PushEvent::from_messages(messages);
        ctx
    }

    #[test]
    fn test_versioning_flag_is_literal() {
        let inputs = |version: &str| ActionInputs {
            version: version.to_string(),
            base_branch: "master".to_string(),
        };
        assert!(inputs("true").versioning_enabled());
        assert!(!inputs("false").versioning_enabled());
        assert!(!inputs("TRUE").versioning_enabled());
        assert!(!inputs("").versioning_enabled());
    }

    #[test]
    fn test_own_version_commit() {
        assert!(context("boilerz-bot", &[":bookmark: v0.0.1"]).is_own_version_commit());
    }

    #[test]
    fn test_version_commit_by_someone_else() {
        assert!(!context("jdoe", &[":bookmark: v0.0.1"]).is_own_version_commit());
    }

    #[test]
    fn test_bot_push_with_several_commits() {
        assert!(!context("boilerz-bot", &[":bookmark: v0.0.1", ":bug: fix"])
            .is_own_version_commit());
    }

    #[test]
    fn test_bot_push_without_version_marker() {
        assert!(!context("boilerz-bot", &[":arrow_up: Bump eslint from 1 to 2"])
            .is_own_version_commit());
        assert!(!context("boilerz-bot", &[]).is_own_version_commit());
    }

    fn file_config() -> Config {
        toml::from_str(
            r#"
[identity]
name = "release-robot"
email = "robot@example.com"

[release]
base_branch = "main"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_overrides_beat_file_values() {
        let mut ctx = ReleaseContext::from_config(&file_config());
        ctx.apply_overrides(RunOverrides {
            github_user: Some("jdoe-bot".to_string()),
            github_email: Some("jdoe@example.com".to_string()),
            base_branch: Some("develop".to_string()),
            ..RunOverrides::default()
        })
        .unwrap();

        assert_eq!(ctx.options.github_user, "jdoe-bot");
        assert_eq!(ctx.options.github_email, "jdoe@example.com");
        assert_eq!(ctx.inputs.base_branch, "develop");
    }

    #[test]
    fn test_file_values_kept_without_overrides() {
        let mut ctx = ReleaseContext::from_config(&file_config());
        ctx.apply_overrides(RunOverrides::default()).unwrap();

        assert_eq!(ctx.options.github_user, "release-robot");
        assert_eq!(ctx.options.github_email, "robot@example.com");
        assert_eq!(ctx.inputs.base_branch, "main");
        assert_eq!(ctx.options.github_token, None);
        assert_eq!(ctx.repository, None);
    }

    #[test]
    fn test_empty_overrides_fall_back_to_file_values() {
        let mut ctx = ReleaseContext::from_config(&file_config());
        ctx.apply_overrides(RunOverrides {
            github_user: Some(String::new()),
            github_email: Some(String::new()),
            base_branch: Some(String::new()),
            github_token: Some(String::new()),
            actor: Some(String::new()),
            ..RunOverrides::default()
        })
        .unwrap();

        assert_eq!(ctx.options.github_user, "release-robot");
        assert_eq!(ctx.options.github_email, "robot@example.com");
        assert_eq!(ctx.inputs.base_branch, "main");
        assert_eq!(ctx.options.github_token, None);
        assert_eq!(ctx.actor, None);
    }

    #[test]
    fn test_defaults_apply_without_file_or_overrides() {
        let mut ctx = ReleaseContext::from_config(&Config::default());
        ctx.apply_overrides(RunOverrides::default()).unwrap();

        assert_eq!(ctx.options.github_user, "boilerz-bot");
        assert_eq!(ctx.inputs.base_branch, "");
        assert!(!ctx.inputs.versioning_enabled());
    }

    #[test]
    fn test_run_values_from_overrides() {
        let mut ctx = ReleaseContext::from_config(&Config::default());
        ctx.apply_overrides(RunOverrides {
            github_ref: Some("refs/heads/master".to_string()),
            github_token: Some("github.token".to_string()),
            actor: Some("jdoe".to_string()),
            repository: Some("jdoe/foo".to_string()),
            version: Some("true".to_string()),
            ..RunOverrides::default()
        })
        .unwrap();

        assert_eq!(ctx.options.github_ref.as_deref(), Some("refs/heads/master"));
        assert_eq!(ctx.options.github_token, Some(Credential::new("github.token")));
        assert_eq!(ctx.actor.as_deref(), Some("jdoe"));
        assert_eq!(ctx.repository, Some(RepoSlug::new("jdoe", "foo")));
        assert!(ctx.inputs.versioning_enabled());
    }

    #[test]
    fn test_invalid_repository_override() {
        let mut ctx = ReleaseContext::from_config(&Config::default());
        let err = ctx
            .apply_overrides(RunOverrides {
                repository: Some("not-a-slug".to_string()),
                ..RunOverrides::default()
            })
            .unwrap_err();
        assert!(matches!(err, ReleaseBotError::Config(_)));
    }

    #[test]
    fn test_event_payload_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"ref": "refs/heads/master", "commits": [{"id": "abc", "message": ":bookmark: v1.0.0", "author": {"name": "bot"}}]}"#,
        )
        .unwrap();

        let event = PushEvent::from_file(file.path()).unwrap();
        assert_eq!(event.commits.len(), 1);
        assert_eq!(event.commits[0].id, "abc");
    }

    #[test]
    fn test_event_payload_without_commits() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"action": "opened"}"#).unwrap();
        assert!(PushEvent::from_file(file.path()).unwrap().commits.is_empty());
    }
}
