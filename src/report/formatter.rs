//! Pure formatting functions for run messages.

use console::style;

use crate::report::Severity;

/// Escape data for a workflow command so multi-line messages stay one command
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Format a message as a GitHub Actions workflow command.
///
/// Info is printed as-is; warnings and failures become `::warning::` and
/// `::error::` annotations.
pub fn workflow_command(severity: Severity, message: &str) -> String {
    match severity {
        Severity::Info => message.to_string(),
        Severity::Warning => format!("::warning::{}", escape_data(message)),
        Severity::Failure => format!("::error::{}", escape_data(message)),
    }
}

/// Format a message for an interactive terminal.
pub fn terminal_line(severity: Severity, message: &str) -> String {
    match severity {
        Severity::Info => format!("{} {}", style("→").yellow(), message),
        Severity::Warning => format!("{} {}", style("WARNING:").yellow().bold(), message),
        Severity::Failure => format!("{} {}", style("ERROR:").red().bold(), message),
    }
}
