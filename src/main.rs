use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use release_bot::cli::orchestration::{self, Collaborators};
use release_bot::command::ProcessRunner;
use release_bot::config;
use release_bot::context::{PushEvent, ReleaseContext, RunOverrides};
use release_bot::github::GitHubClient;
use release_bot::manifest::LocalFileSystem;
use release_bot::report::{ActionsReporter, Reporter};

#[derive(clap::Parser)]
#[command(
    name = "release-bot",
    version,
    about = "Version, tag and push a release when the changes since the last one are worth it"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, env = "GITHUB_REF", help = "Ref that triggered the run")]
    github_ref: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "API token")]
    github_token: Option<String>,

    #[arg(long, env = "GITHUB_EMAIL", help = "Committer email for the release commit")]
    github_email: Option<String>,

    #[arg(long, env = "GITHUB_USER", help = "Committer name and bot login")]
    github_user: Option<String>,

    #[arg(long, env = "GITHUB_ACTOR", help = "Login that triggered the run")]
    actor: Option<String>,

    #[arg(long, env = "GITHUB_REPOSITORY", help = "Repository as owner/repo")]
    repository: Option<String>,

    #[arg(long, env = "GITHUB_EVENT_PATH", help = "Path of the push event payload")]
    event_path: Option<PathBuf>,

    #[arg(long, env = "GITHUB_API_URL", help = "API root URL")]
    api_url: Option<String>,

    #[arg(
        long = "version-input",
        env = "INPUT_VERSION",
        default_value = "",
        help = "Release only when set to `true`"
    )]
    version_input: String,

    #[arg(long, env = "INPUT_BASEBRANCH", help = "Branch releases are cut from")]
    base_branch: Option<String>,

    #[arg(long, help = "Emit logs as JSON lines")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.json_logs);

    let reporter = ActionsReporter::from_env();
    match release(args, &reporter).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            reporter.set_failed(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Build the run context and collaborators, then run the workflow.
///
/// Returns whether the workflow ended without failure; setup errors are
/// returned for the caller to report.
async fn release(args: Args, reporter: &dyn Reporter) -> Result<bool> {
    let config = config::load_config(args.config.as_deref())?;

    let mut ctx = ReleaseContext::from_config(&config);
    ctx.apply_overrides(RunOverrides {
        github_ref: args.github_ref,
        github_token: args.github_token,
        github_email: args.github_email,
        github_user: args.github_user,
        actor: args.actor,
        repository: args.repository,
        version: Some(args.version_input),
        base_branch: args.base_branch,
    })?;
    ctx.event = match args.event_path {
        Some(path) => PushEvent::from_file(&path)
            .with_context(|| format!("Failed to read event payload {}", path.display()))?,
        None => PushEvent::default(),
    };

    let api_url = args
        .api_url
        .filter(|url| !url.is_empty())
        .unwrap_or(config.github.api_url);
    let host = GitHubClient::new(api_url)?;
    let runner = ProcessRunner::new();
    let fs = LocalFileSystem::current_dir()?;
    let deps = Collaborators {
        host: &host,
        runner: &runner,
        fs: &fs,
        reporter,
    };

    Ok(orchestration::run(&ctx, &deps).await.is_ok())
}

/// Diagnostics go to stderr so workflow commands on stdout stay intact
fn init_tracing(json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr).json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .ok();
    }
}
