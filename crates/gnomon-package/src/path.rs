//! Package path splitting.

/// The only extension-less file name recognised as a file rather than a
/// directory.
pub const LICENSE_NAME: &str = "LICENSE";

/// Splits a slash-delimited package path into its directory and file name.
///
/// The last segment is a file name if it contains a `.` or is exactly
/// `LICENSE`; otherwise the whole path is a directory. A trailing slash
/// yields an empty file name, and a path without any slash is a directory.
///
/// ```
/// use gnomon_package::split_filepath;
///
/// assert_eq!(split_filepath("a/b/c.txt"), ("a/b", "c.txt"));
/// assert_eq!(split_filepath("a/b/c"), ("a/b/c", ""));
/// assert_eq!(split_filepath("a/b/LICENSE"), ("a/b", "LICENSE"));
/// ```
pub fn split_filepath(path: &str) -> (&str, &str) {
    let Some(slash) = path.rfind('/') else {
        return (path, "");
    };
    let (dir, last) = (&path[..slash], &path[slash + 1..]);

    if last.contains('.') || last == LICENSE_NAME {
        (dir, last)
    } else if last.is_empty() {
        (dir, "")
    } else {
        (path, "")
    }
}
