//! Classification rule tables
//!
//! Each rule is data: a pattern plus an optional extra check on the file.
//! The classifier only iterates the tables, so a rule can be added or tested
//! without touching control flow.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::FileChange;

/// A changed file pattern that does not justify a release on its own
pub struct ExclusionRule {
    pub name: &'static str,
    pattern: Regex,
    check: Option<fn(&FileChange) -> bool>,
}

impl ExclusionRule {
    fn new(
        name: &'static str,
        pattern: &str,
        check: Option<fn(&FileChange) -> bool>,
    ) -> Option<Self> {
        Regex::new(pattern).ok().map(|pattern| ExclusionRule {
            name,
            pattern,
            check,
        })
    }

    pub fn excludes(&self, file: &FileChange) -> bool {
        self.pattern.is_match(&file.filename) && self.check.map_or(true, |check| check(file))
    }
}

fn patch_touches_version(file: &FileChange) -> bool {
    file.patch
        .as_deref()
        .is_some_and(|patch| patch.contains("version"))
}

/// Files ignored when deciding whether a diff is release-worthy
pub fn exclusion_rules() -> &'static [ExclusionRule] {
    static RULES: OnceLock<Vec<ExclusionRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            ExclusionRule::new(
                "manifest version bump",
                r"package\.json",
                Some(patch_touches_version),
            ),
            ExclusionRule::new(
                "tooling and project metadata",
                r"^\.?(github|husky|eslintignore|eslintrc|gitignore|yarnrc|LICENCE|LICENSE|README|tsconfig)",
                None,
            ),
            ExclusionRule::new("test file", r"\.spec\.[jt]sx?$", None),
        ]
        .into_iter()
        .flatten()
        .collect()
    })
}

/// The first exclusion rule matching `file`, if any
pub fn matching_exclusion(file: &FileChange) -> Option<&'static ExclusionRule> {
    exclusion_rules().iter().find(|rule| rule.excludes(file))
}

pub fn is_merge_commit(message: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)merge").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(message))
}

/// Dependency name from a `... Bump <name> from <old> to <new>` message
pub fn extract_bumped_dependency(message: &str) -> Option<&str> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^.*Bump (.*) from .*").ok())
        .as_ref()
        .and_then(|re| re.captures(message))
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_exclusion_rule_compiles() {
        let names: Vec<_> = exclusion_rules().iter().map(|rule| rule.name).collect();
        assert_eq!(
            names,
            vec![
                "manifest version bump",
                "tooling and project metadata",
                "test file"
            ]
        );
    }

    #[test]
    fn test_manifest_rule_requires_version_patch() {
        let bump = FileChange::with_patch(
            "package.json",
            "-  \"version\": \"1.6.12\",\n+  \"version\": \"1.6.13\",",
        );
        assert_eq!(
            matching_exclusion(&bump).map(|rule| rule.name),
            Some("manifest version bump")
        );

        let deps = FileChange::with_patch("package.json", "+  \"express\": \"^4.17.1\"");
        assert!(matching_exclusion(&deps).is_none());

        assert!(matching_exclusion(&FileChange::new("package.json")).is_none());
    }

    #[test]
    fn test_tooling_paths_are_excluded() {
        for path in [
            ".github/workflows/ci.yml",
            ".husky/pre-commit",
            ".eslintignore",
            ".eslintrc",
            ".eslintrc.js",
            ".gitignore",
            ".yarnrc",
            "LICENCE",
            "LICENSE",
            "README",
            "README.md",
            "tsconfig",
            "tsconfig.build.json",
        ] {
            assert_eq!(
                matching_exclusion(&FileChange::new(path)).map(|rule| rule.name),
                Some("tooling and project metadata"),
                "{} should be excluded",
                path
            );
        }
    }

    #[test]
    fn test_tooling_rule_is_anchored_at_path_start() {
        assert!(matching_exclusion(&FileChange::new("src/README.md")).is_none());
        assert!(matching_exclusion(&FileChange::new("docs/.eslintrc")).is_none());
    }

    #[test]
    fn test_spec_files_are_excluded() {
        for path in [
            "src/__tests__/main.spec.ts",
            "lib/util.spec.js",
            "ui/button.spec.tsx",
            "ui/link.spec.jsx",
        ] {
            assert_eq!(
                matching_exclusion(&FileChange::new(path)).map(|rule| rule.name),
                Some("test file")
            );
        }
        assert!(matching_exclusion(&FileChange::new("src/spec.ts")).is_none());
        assert!(matching_exclusion(&FileChange::new("src/main.spec.ts.snap")).is_none());
    }

    #[test]
    fn test_source_files_survive() {
        assert!(matching_exclusion(&FileChange::new("src/index.ts")).is_none());
        assert!(matching_exclusion(&FileChange::new("yarn.lock")).is_none());
    }

    #[test]
    fn test_merge_detection() {
        assert!(is_merge_commit("Merge commit"));
        assert!(is_merge_commit("Merge pull request #12 from jdoe/foo"));
        assert!(is_merge_commit(":twisted_rightwards_arrows: MERGE develop"));
        assert!(!is_merge_commit(":bug: fix login"));
    }

    #[test]
    fn test_dependency_extraction() {
        assert_eq!(
            extract_bumped_dependency(":arrow_up: Bump eslint from 7.18.0 to 7.19.0"),
            Some("eslint")
        );
        assert_eq!(
            extract_bumped_dependency(":arrow_up: Bump @types/node from 14.14.22 to 14.14.25"),
            Some("@types/node")
        );
        assert_eq!(extract_bumped_dependency(":arrow_up: upgrade everything"), None);
    }

    #[test]
    fn test_dependency_extraction_ignores_body() {
        assert_eq!(
            extract_bumped_dependency(":arrow_up: update deps\n\nBump eslint from 1 to 2"),
            None
        );
    }
}
