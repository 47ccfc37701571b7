use std::collections::BTreeSet;

use crate::analyzer::rules;
use crate::domain::{CommitKind, Comparison, FileChange};

/// Decides whether a comparison contains anything worth shipping
pub struct ChangeClassifier {
    dev_dependencies: BTreeSet<String>,
}

impl ChangeClassifier {
    /// Create a classifier for a package with the given development dependencies
    pub fn new(dev_dependencies: BTreeSet<String>) -> Self {
        ChangeClassifier { dev_dependencies }
    }

    /// Whether the comparison warrants a release.
    ///
    /// Returns `false` without looking at files when every non-merge commit
    /// bumps a development dependency. Otherwise at least one changed file
    /// must escape every [rules::exclusion_rules] entry.
    pub fn are_changes_worth_release(&self, comparison: &Comparison) -> bool {
        let non_merge_commits: Vec<_> = comparison
            .commits
            .iter()
            .filter(|commit| !rules::is_merge_commit(&commit.message))
            .collect();
        tracing::info!("↩️ Non merge commits found {}", non_merge_commits.len());
        tracing::info!(
            "📦👨‍💻 Dev dependencies : {}",
            self.dev_dependencies
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(",")
        );

        let dev_dependency_updates: Vec<&str> = non_merge_commits
            .iter()
            .filter(|commit| commit.is_kind(CommitKind::DependencyUpdate))
            .map(|commit| self.bumped_dependency(&commit.message))
            .filter(|dependency| self.dev_dependencies.contains(*dependency))
            .collect();
        for dependency in &dev_dependency_updates {
            tracing::info!("📦👨‍💻 {}", dependency);
        }

        if dev_dependency_updates.len() == non_merge_commits.len() {
            tracing::info!("👨‍💻 Commits contain only dev dependencies update");
            return false;
        }

        if comparison.files.is_empty() {
            return false;
        }

        let worthy_files: Vec<&FileChange> = comparison
            .files
            .iter()
            .filter(|file| match rules::matching_exclusion(file) {
                Some(rule) => {
                    tracing::debug!(file = %file.filename, rule = rule.name, "excluded");
                    false
                }
                None => true,
            })
            .collect();
        tracing::debug!(
            "📄 Updated files: {}",
            file_names(comparison.files.iter())
        );
        tracing::debug!(
            "📄 Worthy release files: {}",
            file_names(worthy_files.iter().copied())
        );

        !worthy_files.is_empty()
    }

    /// Name of the bumped dependency, empty when the message does not follow the bump format
    fn bumped_dependency<'m>(&self, message: &'m str) -> &'m str {
        match rules::extract_bumped_dependency(message) {
            Some(dependency) => {
                tracing::info!(
                    "📦 Retrieved {} from message: {}",
                    dependency,
                    message.lines().next().unwrap_or("")
                );
                dependency
            }
            None => {
                tracing::warn!("⚠️ Malformed bump commit message : {}", message);
                ""
            }
        }
    }
}

fn file_names<'f>(files: impl Iterator<Item = &'f FileChange>) -> String {
    files
        .map(|file| file.filename.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
