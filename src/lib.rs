pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod command;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod github;
pub mod history;
pub mod manifest;
pub mod report;
pub mod versioner;

pub use error::{ReleaseBotError, Result};
