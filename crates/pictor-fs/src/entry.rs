//! Directory entry records produced by the lister.

use serde::{Deserialize, Serialize};

/// One child of a listed directory.
///
/// Exactly one of `is_directory` / `is_file` is true. For directories,
/// `filename` is the absolute normalized path; for files it is the path
/// relative to the lister's asset root, so the display side can load it as a
/// resource URL directly.
///
/// On the wire the record is `{"filename", "isDirectory", "isFile"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirEntry {
    pub filename: String,
    pub is_directory: bool,
    pub is_file: bool,
}

impl DirEntry {
    /// Creates a directory entry.
    pub fn directory(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            is_directory: true,
            is_file: false,
        }
    }

    /// Creates a file entry.
    pub fn file(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            is_directory: false,
            is_file: true,
        }
    }
}

/// Entries of one directory, in filesystem enumeration order.
pub type Listing = Vec<DirEntry>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_string(&DirEntry::file("img/a.png")).unwrap();
        assert_eq!(
            json,
            r#"{"filename":"img/a.png","isDirectory":false,"isFile":true}"#
        );
    }

    #[test]
    fn test_constructors_set_exactly_one_flag() {
        let dir = DirEntry::directory("/srv/photos");
        let file = DirEntry::file("a.jpg");
        assert!(dir.is_directory ^ dir.is_file);
        assert!(file.is_directory ^ file.is_file);
    }
}
