//! Path normalization helpers.
//!
//! Normalization is purely lexical: `.` segments are dropped, `..` segments
//! pop the previous component, and the platform separator is used throughout.
//! Nothing here touches the filesystem or resolves symlinks, and nothing
//! constrains a path to stay inside any particular tree.

use std::path::{Component, Path, PathBuf};

use crate::error::{FsError, FsResult};

/// Normalizes a path lexically.
///
/// Leading `..` segments of a relative path are kept, `..` at the root is
/// dropped, and an empty result becomes `.`.
///
/// # Examples
///
/// ```
/// use pictor_fs::path::normalize;
///
/// assert_eq!(normalize("./photos/../images/"), std::path::PathBuf::from("images"));
/// assert_eq!(normalize("/a/./b/../c"), std::path::PathBuf::from("/a/c"));
/// assert_eq!(normalize(""), std::path::PathBuf::from("."));
/// ```
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::Prefix(p) => result.push(p.as_os_str()),
            Component::RootDir => result.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match result.components().next_back() {
                Some(Component::Normal(_)) => {
                    result.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => result.push(".."),
            },
            Component::Normal(c) => result.push(c),
        }
    }
    if result.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        result
    }
}

/// Joins `child` onto `base` and normalizes the result.
pub fn join_normalized(base: impl AsRef<Path>, child: impl AsRef<Path>) -> PathBuf {
    normalize(base.as_ref().join(child))
}

/// Returns the absolute, normalized form of a path.
///
/// Relative paths are resolved against the current working directory.
pub fn absolute(path: impl AsRef<Path>) -> FsResult<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        let cwd = std::env::current_dir().map_err(|e| FsError::from_io(e, path))?;
        Ok(normalize(cwd.join(path)))
    }
}

/// Computes a relative path from a base to a target.
///
/// Both paths should be either both absolute or both relative for
/// consistent results.
///
/// # Examples
///
/// ```
/// use pictor_fs::path::relative_to;
///
/// let rel = relative_to("/app/renderer", "/app/renderer/img/cat.png");
/// assert_eq!(rel.to_string_lossy(), "img/cat.png");
///
/// let rel = relative_to("/app/renderer", "/home/user/photo.jpg");
/// assert_eq!(rel.to_string_lossy(), "../../home/user/photo.jpg");
/// ```
pub fn relative_to(base: impl AsRef<Path>, target: impl AsRef<Path>) -> PathBuf {
    let mut base_components = base.as_ref().components().peekable();
    let mut target_components = target.as_ref().components().peekable();

    // Skip common prefix
    while let (Some(b), Some(t)) = (base_components.peek(), target_components.peek()) {
        if b == t {
            base_components.next();
            target_components.next();
        } else {
            break;
        }
    }

    let mut result = PathBuf::new();
    for _ in base_components {
        result.push("..");
    }
    for component in target_components {
        result.push(component);
    }

    if result.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        result
    }
}
