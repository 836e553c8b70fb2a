//! In-memory package bundles.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validator::PackageValidator;

/// A single named source (or metadata) file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemFile {
    pub name: String,
    pub body: String,
}

impl MemFile {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

/// A package as submitted for admission: its declared name, its import path
/// and its files.
///
/// Construction performs no checks. Call [`validate`](Self::validate) (or a
/// configured [`PackageValidator`]) before admitting the package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemPackage {
    /// Package name as declared by the `package` clause.
    pub name: String,
    /// Import path, e.g. `gno.land/p/demo/avl`.
    pub path: String,
    pub files: Vec<MemFile>,
}

impl MemPackage {
    pub fn new(name: impl Into<String>, path: impl Into<String>, files: Vec<MemFile>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            files,
        }
    }

    /// First file named exactly `name`.
    pub fn get_file(&self, name: &str) -> Option<&MemFile> {
        self.files.iter().find(|file| file.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Runs the admission checks with the default limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        PackageValidator::default().validate(self)
    }
}
