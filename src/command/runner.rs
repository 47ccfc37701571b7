use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::command::{display_command, CommandRunner};
use crate::error::{ReleaseBotError, Result};

/// Executes commands as child processes in the current working directory
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        ProcessRunner
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let command = display_command(program, args);
        info!("[command]{}", command);

        let output = Command::new(program).args(args).output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            return Err(ReleaseBotError::CommandFailed {
                command,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(stdout)
    }
}
