//! Package admission checks.
//!
//! Every node must accept or reject a package identically, so the checks run
//! in a fixed order and stop at the first failure:
//!
//! 1. at least one file
//! 2. path length
//! 3. package name grammar
//! 4. package/realm path grammar
//! 5. files sorted by name
//! 6. file name grammar and duplicate names
//! 7. import isolation: a library (`gno.land/p/...`) must not import a
//!    realm (`gno.land/r/...`) from any of its source files

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace, warn};

use crate::error::ValidationError;
use crate::package::MemPackage;
use crate::scan::scan_imports;

/// Default upper bound on the byte length of a package path.
pub const PATH_LENGTH_LIMIT: usize = 256;

/// Suffix of source files whose imports are checked.
pub const SOURCE_SUFFIX: &str = ".gno";

pub const PACKAGE_NAME_PATTERN: &str = r"^[a-z][a-z0-9_]*$";
pub const PACKAGE_PATH_PATTERN: &str = r"^gno\.land/(?:p|r)(?:/_?[a-z]+[a-z0-9_]*)+$";
pub const FILE_NAME_PATTERN: &str = r"^([a-zA-Z0-9_]*\.[a-z0-9_\.]*|LICENSE|README)$";

type Grammar = LazyLock<Result<Regex, regex::Error>>;

static PACKAGE_NAME: Grammar = LazyLock::new(|| Regex::new(PACKAGE_NAME_PATTERN));
static PACKAGE_PATH: Grammar = LazyLock::new(|| Regex::new(PACKAGE_PATH_PATTERN));
static FILE_NAME: Grammar = LazyLock::new(|| Regex::new(FILE_NAME_PATTERN));

/// A grammar that failed to compile matches nothing.
fn matches(grammar: &Grammar, text: &str) -> bool {
    grammar.as_ref().is_ok_and(|re| re.is_match(text))
}

/// Returns the byte offset of `marker` when it directly follows the first
/// path segment, i.e. when nothing before it contains a `/`.
///
/// `gno.land/p/demo/r/x` has `/r/` at a nested position and is therefore not
/// a realm path.
fn top_level_marker(path: &str, marker: &str) -> Option<usize> {
    path.find(marker)
        .filter(|&index| index > 0 && !path[..index].contains('/'))
}

/// Whether `path` names a public library (`<domain>/p/...`).
pub fn is_library_path(path: &str) -> bool {
    top_level_marker(path, "/p/").is_some()
}

/// Whether `path` names a realm (`<domain>/r/...`).
pub fn is_realm_path(path: &str) -> bool {
    top_level_marker(path, "/r/").is_some()
}

/// Admission checks for [`MemPackage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageValidator {
    max_path_length: usize,
}

impl Default for PackageValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageValidator {
    pub fn new() -> Self {
        Self {
            max_path_length: PATH_LENGTH_LIMIT,
        }
    }

    pub fn with_max_path_length(mut self, max_path_length: usize) -> Self {
        self.max_path_length = max_path_length;
        self
    }

    pub fn max_path_length(&self) -> usize {
        self.max_path_length
    }

    /// Checks `pkg` for admission. Does not modify the package.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the first failing check.
    pub fn validate(&self, pkg: &MemPackage) -> Result<(), ValidationError> {
        match self.check(pkg) {
            Ok(()) => {
                debug!(path = %pkg.path, files = pkg.files.len(), "package admitted");
                Ok(())
            }
            Err(error) => {
                warn!(path = %pkg.path, error = %error, "package rejected");
                Err(error)
            }
        }
    }

    fn check(&self, pkg: &MemPackage) -> Result<(), ValidationError> {
        if pkg.is_empty() {
            return Err(ValidationError::EmptyPackage {
                name: pkg.name.clone(),
            });
        }

        if pkg.path.len() > self.max_path_length {
            return Err(ValidationError::PathTooLong {
                length: pkg.path.len(),
                limit: self.max_path_length,
            });
        }

        if !matches(&PACKAGE_NAME, &pkg.name) {
            return Err(ValidationError::InvalidName {
                name: pkg.name.clone(),
                pattern: PACKAGE_NAME_PATTERN,
            });
        }

        if !matches(&PACKAGE_PATH, &pkg.path) {
            return Err(ValidationError::InvalidPath {
                path: pkg.path.clone(),
                pattern: PACKAGE_PATH_PATTERN,
            });
        }

        // Equal neighbours count as sorted; they are reported as duplicates below.
        if !pkg.files.is_sorted_by(|a, b| a.name <= b.name) {
            return Err(ValidationError::UnsortedFiles {
                path: pkg.path.clone(),
            });
        }

        let mut prev: Option<&str> = None;
        for file in &pkg.files {
            if !matches(&FILE_NAME, &file.name) {
                return Err(ValidationError::InvalidFileName {
                    name: file.name.clone(),
                    pattern: FILE_NAME_PATTERN,
                });
            }
            if prev == Some(file.name.as_str()) {
                return Err(ValidationError::DuplicateFileName {
                    name: file.name.clone(),
                });
            }
            prev = Some(&file.name);
        }

        if is_library_path(&pkg.path) {
            check_import_isolation(pkg)?;
        }

        Ok(())
    }
}

fn check_import_isolation(pkg: &MemPackage) -> Result<(), ValidationError> {
    let sources = pkg
        .files
        .iter()
        .filter(|file| file.name.ends_with(SOURCE_SUFFIX));

    for file in sources {
        let imports = scan_imports(&file.name, &file.body).map_err(|source| {
            ValidationError::ImportParseFailure {
                file: file.name.clone(),
                path: pkg.path.clone(),
                source,
            }
        })?;
        trace!(file = %file.name, imports = imports.len(), "scanned imports");

        if let Some(realm) = imports.into_iter().find(|import| is_realm_path(import)) {
            return Err(ValidationError::RealmImportViolation {
                path: pkg.path.clone(),
                import: realm,
            });
        }
    }
    Ok(())
}
