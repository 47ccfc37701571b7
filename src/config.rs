use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::BumpType;
use crate::error::{ReleaseBotError, Result};
use crate::github::client::DEFAULT_API_URL;

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "release-bot.toml";

/// Bot identity used when neither the environment nor a config file sets one
pub const DEFAULT_BOT_NAME: &str = "boilerz-bot";
pub const DEFAULT_BOT_EMAIL: &str = "77937117+boilerz-bot@users.noreply.github.com";

/// Represents the complete file configuration for release-bot.
///
/// Every field has a default, so an absent or empty file is valid. Values from
/// the command line or environment take precedence over these.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub identity: IdentityConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub github: GitHubConfig,
}

/// Committer identity for the release commit; `name` is also the bot actor
/// whose version commits are ignored.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IdentityConfig {
    #[serde(default = "default_bot_name")]
    pub name: String,

    #[serde(default = "default_bot_email")]
    pub email: String,
}

fn default_bot_name() -> String {
    DEFAULT_BOT_NAME.to_string()
}

fn default_bot_email() -> String {
    DEFAULT_BOT_EMAIL.to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        IdentityConfig {
            name: default_bot_name(),
            email: default_bot_email(),
        }
    }
}

/// Release policy knobs
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Branch releases are cut from when the `baseBranch` input is not given
    #[serde(default)]
    pub base_branch: Option<String>,

    /// Manifest path relative to the working directory
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    #[serde(default)]
    pub package_manager: PackageManager,
}

fn default_manifest() -> PathBuf {
    PathBuf::from("package.json")
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            base_branch: None,
            manifest: default_manifest(),
            package_manager: PackageManager::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: default_api_url(),
        }
    }
}

/// Tool that bumps the manifest version and creates the release commit and tag
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Yarn,
    Npm,
}

impl PackageManager {
    pub fn program(self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    /// Arguments of the version command for `bump`
    pub fn version_args(self, bump: BumpType) -> Vec<String> {
        match self {
            PackageManager::Yarn => vec!["version".to_string(), format!("--{}", bump)],
            PackageManager::Npm => vec!["version".to_string(), bump.to_string()],
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-bot.toml` in current directory
/// 3. `release-bot.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(PathBuf::from(path)),
        None => discover_config(),
    };

    match path {
        Some(path) => parse_config_file(&path),
        None => Ok(Config::default()),
    }
}

fn discover_config() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

fn parse_config_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path).map_err(|e| {
        ReleaseBotError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    toml::from_str(&contents)
        .map_err(|e| ReleaseBotError::config(format!("Invalid {}: {}", path.display(), e)))
}
