//! Operator-facing run messages.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting of workflow commands and terminal lines
//! - This module - The [Reporter] capability and its implementations

use std::sync::Mutex;

pub mod formatter;

/// Message category; monitoring treats warnings and failures differently from info
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Failure,
}

/// Sink for the messages the hosting CI shows to the operator
pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    /// Mark the run failed with `message`
    fn set_failed(&self, message: &str);

    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => self.info(message),
            Severity::Warning => self.warning(message),
            Severity::Failure => self.set_failed(message),
        }
    }
}

/// Writes GitHub workflow commands on an Actions runner, styled lines elsewhere
pub struct ActionsReporter {
    workflow_commands: bool,
}

impl ActionsReporter {
    pub fn new(workflow_commands: bool) -> Self {
        ActionsReporter { workflow_commands }
    }

    /// Detect the runner from `GITHUB_ACTIONS`
    pub fn from_env() -> Self {
        Self::new(std::env::var("GITHUB_ACTIONS").is_ok_and(|value| value == "true"))
    }

    fn emit(&self, severity: Severity, message: &str) {
        let line = if self.workflow_commands {
            formatter::workflow_command(severity, message)
        } else {
            formatter::terminal_line(severity, message)
        };
        match severity {
            Severity::Failure => eprintln!("{}", line),
            Severity::Info | Severity::Warning => println!("{}", line),
        }
    }
}

impl Reporter for ActionsReporter {
    fn info(&self, message: &str) {
        self.emit(Severity::Info, message);
    }

    fn warning(&self, message: &str) {
        self.emit(Severity::Warning, message);
    }

    fn set_failed(&self, message: &str) {
        self.emit(Severity::Failure, message);
    }
}

/// Captures messages for assertions in tests
#[derive(Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<(Severity, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    pub fn messages_of(&self, severity: Severity) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, message)| message)
            .collect()
    }

    pub fn has_failed(&self) -> bool {
        !self.messages_of(Severity::Failure).is_empty()
    }

    fn record(&self, severity: Severity, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((severity, message.to_string()));
        }
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.record(Severity::Info, message);
    }

    fn warning(&self, message: &str) {
        self.record(Severity::Warning, message);
    }

    fn set_failed(&self, message: &str) {
        self.record(Severity::Failure, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_reporter() {
        let reporter = RecordingReporter::new();
        reporter.info("one");
        reporter.report(Severity::Warning, "two");
        reporter.set_failed("three");

        assert_eq!(reporter.messages_of(Severity::Info), vec!["one"]);
        assert_eq!(reporter.messages_of(Severity::Warning), vec!["two"]);
        assert!(reporter.has_failed());
    }
}
