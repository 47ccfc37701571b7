/// Classification of a commit by the emoji marker that starts its message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
    DependencyUpdate,
    Feature,
    Bug,
    Merge,
    Other,
    VersionBump,
}

impl CommitKind {
    /// The message prefix identifying this kind
    pub fn marker(self) -> &'static str {
        match self {
            CommitKind::DependencyUpdate => ":arrow_up:",
            CommitKind::Feature => ":sparkles:",
            CommitKind::Bug => ":bug:",
            CommitKind::Merge => ":twisted_rightwards_arrows:",
            CommitKind::Other => ":card_file_box:",
            CommitKind::VersionBump => ":bookmark:",
        }
    }
}

/// A commit as reported by the repository host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    pub message: String,
}

impl Commit {
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Commit {
            sha: sha.into(),
            message: message.into(),
        }
    }

    /// First line of the message, the only part the release rules look at
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn is_kind(&self, kind: CommitKind) -> bool {
        self.message.starts_with(kind.marker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_is_first_line() {
        let commit = Commit::new("abc", ":bug: fix crash\n\nlong body");
        assert_eq!(commit.subject(), ":bug: fix crash");
    }

    #[test]
    fn test_subject_of_empty_message() {
        assert_eq!(Commit::new("abc", "").subject(), "");
    }

    #[test]
    fn test_kind_from_marker() {
        assert!(Commit::new("a", ":arrow_up: Bump eslint from 1 to 2")
            .is_kind(CommitKind::DependencyUpdate));
        assert!(Commit::new("a", ":sparkles: add login").is_kind(CommitKind::Feature));
        assert!(Commit::new("a", ":bookmark: v1.0.0").is_kind(CommitKind::VersionBump));
        assert!(!Commit::new("a", "plain message").is_kind(CommitKind::Bug));
    }

    #[test]
    fn test_marker_must_lead() {
        let commit = Commit::new("a", "release :bookmark: v1.0.0");
        assert!(!commit.is_kind(CommitKind::VersionBump));
    }
}
