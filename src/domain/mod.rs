//! Domain logic - pure release rules independent of the host API and local tooling

pub mod branch;
pub mod bump;
pub mod commit;
pub mod comparison;
pub mod pull_request;

pub use branch::current_branch;
pub use bump::BumpType;
pub use commit::{Commit, CommitKind};
pub use comparison::{Comparison, FileChange};
pub use pull_request::PullRequestSummary;
