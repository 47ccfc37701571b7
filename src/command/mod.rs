//! External command execution
//!
//! - [runner::ProcessRunner]: spawns real child processes through tokio
//! - [mock::MockRunner]: records invocations and replays scripted output

pub mod mock;
pub mod runner;

pub use mock::MockRunner;
pub use runner::ProcessRunner;

use async_trait::async_trait;

use crate::error::Result;

/// Runs a program to completion and captures its standard output.
///
/// A non-zero exit status is an error (`CommandFailed`); implementations never
/// retry.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[&str]) -> Result<String>;
}

/// `program arg1 arg2` for logs and error messages
pub fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
