use std::sync::Mutex;

use async_trait::async_trait;

use crate::command::{display_command, CommandRunner};
use crate::error::{ReleaseBotError, Result};

struct Scripted {
    command: String,
    result: std::result::Result<String, i32>,
}

/// Mock runner for testing without spawning processes.
///
/// Every invocation is recorded as its display string (`git push --tags`).
/// Commands without a scripted response succeed with empty output.
#[derive(Default)]
pub struct MockRunner {
    scripted: Vec<Scripted>,
    calls: Mutex<Vec<String>>,
}

impl MockRunner {
    /// Create a new mock runner with no scripted responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `command` with `stdout`
    pub fn respond(mut self, command: &str, stdout: impl Into<String>) -> Self {
        self.scripted.push(Scripted {
            command: command.to_string(),
            result: Ok(stdout.into()),
        });
        self
    }

    /// Make `command` exit with `code`
    pub fn fail(mut self, command: &str, code: i32) -> Self {
        self.scripted.push(Scripted {
            command: command.to_string(),
            result: Err(code),
        });
        self
    }

    /// Commands run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let command = display_command(program, args);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.clone());
        }

        match self.scripted.iter().find(|s| s.command == command) {
            Some(Scripted { result: Ok(stdout), .. }) => Ok(stdout.clone()),
            Some(Scripted { result: Err(code), .. }) => Err(ReleaseBotError::CommandFailed {
                command,
                code: *code,
                stderr: String::new(),
            }),
            None => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_and_replays_output() {
        let runner = MockRunner::new().respond("git status -uno", "On branch master");
        assert_eq!(
            runner.run("git", &["status", "-uno"]).await.unwrap(),
            "On branch master"
        );
        assert_eq!(runner.run("git", &["push"]).await.unwrap(), "");
        assert_eq!(runner.calls(), vec!["git status -uno", "git push"]);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let runner = MockRunner::new().fail("git push", 1);
        assert!(runner.run("git", &["push"]).await.is_err());
    }
}
