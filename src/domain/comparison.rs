use crate::domain::Commit;

/// A file touched between two refs, with its patch when the host provides one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub filename: String,
    pub patch: Option<String>,
}

impl FileChange {
    pub fn new(filename: impl Into<String>) -> Self {
        FileChange {
            filename: filename.into(),
            patch: None,
        }
    }

    pub fn with_patch(filename: impl Into<String>, patch: impl Into<String>) -> Self {
        FileChange {
            filename: filename.into(),
            patch: Some(patch.into()),
        }
    }
}

/// Commits (oldest first) and changed files between a base ref and a head ref
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    pub commits: Vec<Commit>,
    pub files: Vec<FileChange>,
}

impl Comparison {
    pub fn new(commits: Vec<Commit>, files: Vec<FileChange>) -> Self {
        Comparison { commits, files }
    }
}
