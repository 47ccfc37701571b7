//! Package manifest access
//!
//! The manifest (`package.json`) is read through the [FileSystem] capability
//! so tests can substitute an in-memory tree for the working directory.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Deserialize;

use crate::error::{ReleaseBotError, Result};

/// Reads UTF-8 files relative to the working directory
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The process working directory
pub struct LocalFileSystem {
    root: PathBuf,
}

impl LocalFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalFileSystem { root: root.into() }
    }

    /// Rooted at the current working directory
    pub fn current_dir() -> Result<Self> {
        Ok(LocalFileSystem::new(std::env::current_dir()?))
    }
}

impl FileSystem for LocalFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(self.root.join(path))
    }
}

/// In-memory file tree for tests
#[derive(Default)]
pub struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.into(), contents.into());
        }
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let files = self
            .files
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "file table poisoned"))?;
        files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }
}

/// The subset of `package.json` the release policy reads.
///
/// `version` is kept loose: private packages often omit it, and only the
/// version preview needs it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Manifest {
    #[serde(default)]
    pub version: Option<serde_json::Value>,

    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl Manifest {
    pub fn parse(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| ReleaseBotError::manifest(e.to_string()))
    }

    /// The version when it is present and a string
    pub fn version_str(&self) -> Option<&str> {
        self.version.as_ref().and_then(serde_json::Value::as_str)
    }
}

/// Loads the manifest on demand from a [FileSystem]
pub struct ManifestReader<'a> {
    fs: &'a dyn FileSystem,
    path: PathBuf,
}

impl<'a> ManifestReader<'a> {
    pub fn new(fs: &'a dyn FileSystem, path: impl Into<PathBuf>) -> Self {
        ManifestReader {
            fs,
            path: path.into(),
        }
    }

    /// Read and parse the manifest.
    ///
    /// # Errors
    /// * `ManifestUnreadable` - if the file is missing, not UTF-8, or not a valid manifest
    pub fn load(&self) -> Result<Manifest> {
        tracing::debug!(path = %self.path.display(), "📦 package.json path");
        let contents = self
            .fs
            .read_to_string(&self.path)
            .map_err(|e| ReleaseBotError::manifest(format!("{}: {}", self.path.display(), e)))?;
        Manifest::parse(&contents)
    }

    /// # Errors
    /// * `ManifestUnreadable` - if the manifest cannot be loaded or has no string `version`
    pub fn current_version(&self) -> Result<String> {
        self.load()?
            .version_str()
            .map(str::to_string)
            .ok_or_else(|| {
                ReleaseBotError::manifest(format!(
                    "{}: no string version field",
                    self.path.display()
                ))
            })
    }

    /// Names of the development-only dependencies, empty when the section is absent
    pub fn dev_dependencies(&self) -> Result<BTreeSet<String>> {
        Ok(self.load()?.dev_dependencies.into_keys().collect())
    }
}
