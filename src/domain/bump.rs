use std::fmt;

/// Semantic version component to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpType {
    Patch,
    Minor,
    Major,
}

impl BumpType {
    pub fn as_str(self) -> &'static str {
        match self {
            BumpType::Patch => "patch",
            BumpType::Minor => "minor",
            BumpType::Major => "major",
        }
    }

    /// Version the package manager will produce from `current` for this bump.
    ///
    /// A pre-release is promoted to its own release when the bumped component
    /// is the lowest non-zero one, e.g. `1.3.0-beta.1` bumps minor to `1.3.0`.
    pub fn next_version(self, current: &semver::Version) -> semver::Version {
        let released = current.pre.is_empty();
        let (major, minor, patch) = (current.major, current.minor, current.patch);
        match self {
            BumpType::Major if released || minor != 0 || patch != 0 => {
                semver::Version::new(major + 1, 0, 0)
            }
            BumpType::Major => semver::Version::new(major, 0, 0),
            BumpType::Minor if released || patch != 0 => {
                semver::Version::new(major, minor + 1, 0)
            }
            BumpType::Minor => semver::Version::new(major, minor, 0),
            BumpType::Patch if released => semver::Version::new(major, minor, patch + 1),
            BumpType::Patch => semver::Version::new(major, minor, patch),
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
