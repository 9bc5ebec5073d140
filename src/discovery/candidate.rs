//! Entry classification for the tree walker.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// A file accepted by the extension filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateModule {
    /// Path as reached from the configured root.
    pub path: PathBuf,
    /// Path relative to the configured root.
    pub relative: PathBuf,
    /// The recognized extension the file name ends in, without the dot.
    pub extension: String,
}

impl CandidateModule {
    /// Build a candidate for `path` found under `root`.
    pub fn new(root: &Path, path: PathBuf, extension: impl Into<String>) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        Self {
            path,
            relative,
            extension: extension.into(),
        }
    }

    /// Relative path with `/` separators, used as a registry key.
    pub fn relative_key(&self) -> String {
        self.relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// How the walker treats one directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Recurse into it.
    Directory,
    /// Hand it to the mounter; carries the matched extension.
    Candidate(String),
    /// Skip silently.
    Ignored,
}

/// Return the recognized extension `file_name` ends in, if any.
///
/// Matches on the full name, so `.rs` alone counts. Names that are not
/// valid UTF-8 never match.
pub fn match_extension(file_name: &OsStr, extensions: &[String]) -> Option<String> {
    let name = file_name.to_str()?;
    extensions
        .iter()
        .find(|ext| {
            name.strip_suffix(ext.as_str())
                .is_some_and(|rest| rest.ends_with('.'))
        })
        .cloned()
}

/// Classify an entry from its name and resolved file type.
pub fn classify(file_name: &OsStr, is_dir: bool, is_file: bool, extensions: &[String]) -> EntryKind {
    if is_dir {
        return EntryKind::Directory;
    }
    if !is_file {
        return EntryKind::Ignored;
    }
    match match_extension(file_name, extensions) {
        Some(ext) => EntryKind::Candidate(ext),
        None => EntryKind::Ignored,
    }
}
