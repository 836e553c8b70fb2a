//! Error types for package admission.

use thiserror::Error;

/// A package was rejected at admission.
///
/// Variants are listed in the order the validator checks them; only the
/// first failing check is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no files found within package {name:?}")]
    EmptyPackage { name: String },

    #[error("path length {length} exceeds limit {limit}")]
    PathTooLong { length: usize, limit: usize },

    #[error("invalid package name {name:?}, failed to match {pattern:?}")]
    InvalidName { name: String, pattern: &'static str },

    #[error("invalid package/realm path {path:?}, failed to match {pattern:?}")]
    InvalidPath { path: String, pattern: &'static str },

    #[error("mempackage {path:?} has unsorted files")]
    UnsortedFiles { path: String },

    #[error("invalid file name {name:?}, failed to match {pattern:?}")]
    InvalidFileName { name: String, pattern: &'static str },

    #[error("duplicate file name {name:?}")]
    DuplicateFileName { name: String },

    #[error("failed to parse imports in file {file:?} of package {path:?}: {source}")]
    ImportParseFailure {
        file: String,
        path: String,
        #[source]
        source: ScanError,
    },

    #[error("package {path:?} imports realm {import:?}")]
    RealmImportViolation { path: String, import: String },
}

/// The import block of a source file could not be parsed.
///
/// Positions are 1-based; `column` counts bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}:{line}:{column}: {message}")]
pub struct ScanError {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}
