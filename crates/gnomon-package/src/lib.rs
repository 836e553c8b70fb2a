//! gnomon-package: Package admission for `Gnomon`
//!
//! Contract source is distributed as packages: a name, an import path and a
//! sorted list of files. Before a package enters the code store, every node
//! runs the same structural checks on it and enforces *import isolation*:
//! public libraries (`gno.land/p/...`) may never import realms
//! (`gno.land/r/...`), since realms carry privileged, stateful capability.
//!
//! Import isolation needs the import list of each source file. The
//! [`scan_imports`] scanner reads only the package clause and import
//! declarations, so admission does not depend on a full compiler.
//!
//! # Example
//!
//! ```
//! use gnomon_package::{MemFile, MemPackage, ValidationError};
//!
//! let pkg = MemPackage::new(
//!     "avl",
//!     "gno.land/p/demo/avl",
//!     vec![MemFile::new("tree.gno", "package avl\n\nimport \"gno.land/r/demo/users\"\n")],
//! );
//!
//! assert!(matches!(
//!     pkg.validate(),
//!     Err(ValidationError::RealmImportViolation { .. })
//! ));
//! ```

mod error;
mod package;
mod path;
mod scan;
mod validator;


pub use error::{ScanError, ValidationError};
pub use package::{MemFile, MemPackage};
pub use path::{LICENSE_NAME, split_filepath};
pub use scan::scan_imports;
pub use validator::{
    FILE_NAME_PATTERN, PACKAGE_NAME_PATTERN, PACKAGE_PATH_PATTERN, PATH_LENGTH_LIMIT,
    PackageValidator, SOURCE_SUFFIX, is_library_path, is_realm_path,
};
