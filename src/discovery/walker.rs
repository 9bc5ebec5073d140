//! Recursive directory traversal.
//!
//! # Responsibilities
//! - Enumerate every regular file under the routes root, depth-first
//! - Recurse into subdirectories immediately, never treating them as modules
//! - Hand each candidate to the visitor as soon as it is found
//!
//! # Design Decisions
//! - Blocking `std::fs`: discovery runs once, before the server starts
//! - Directory order is whatever `read_dir` yields unless `sort_entries` is set
//! - Symlinked directories are followed but never re-entered while they are
//!   already on the current path, so cycles terminate
//! - `max_depth` bounds pathological trees with an explicit error

use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};

use crate::config::RouterConfig;
use crate::discovery::candidate::{classify, CandidateModule, EntryKind};
use crate::routing::types::{RouterError, RouterResult};

fn fs_error(path: &Path) -> impl FnOnce(std::io::Error) -> RouterError + '_ {
    move |source| RouterError::Filesystem {
        path: path.to_path_buf(),
        source,
    }
}

/// Depth-first walker over the configured routes directory.
#[derive(Debug)]
pub struct TreeWalker<'a> {
    config: &'a RouterConfig,
}

impl<'a> TreeWalker<'a> {
    pub fn new(config: &'a RouterConfig) -> Self {
        Self { config }
    }

    /// Walk the tree, calling `visit` for every candidate module.
    ///
    /// Any filesystem error or visitor error aborts the walk.
    pub fn walk<F>(&self, visit: &mut F) -> RouterResult<()>
    where
        F: FnMut(CandidateModule) -> RouterResult<()>,
    {
        let mut ancestors = Vec::new();
        self.walk_dir(&self.config.directory, 0, &mut ancestors, visit)
    }

    fn walk_dir<F>(
        &self,
        dir: &Path,
        depth: usize,
        ancestors: &mut Vec<PathBuf>,
        visit: &mut F,
    ) -> RouterResult<()>
    where
        F: FnMut(CandidateModule) -> RouterResult<()>,
    {
        if depth > self.config.max_depth {
            return Err(RouterError::DepthExceeded {
                path: dir.to_path_buf(),
                max_depth: self.config.max_depth,
            });
        }

        if self.config.follow_symlinks {
            let canonical = fs::canonicalize(dir).map_err(fs_error(dir))?;
            if ancestors.contains(&canonical) {
                tracing::warn!(
                    path = %dir.display(),
                    target_dir = %canonical.display(),
                    "Skipping directory that links back to its own ancestor"
                );
                return Ok(());
            }
            ancestors.push(canonical);
        }

        for entry in self.read_entries(dir)? {
            let path = entry.path();
            match self.classify_entry(&entry, &path)? {
                EntryKind::Directory => self.walk_dir(&path, depth + 1, ancestors, visit)?,
                EntryKind::Candidate(ext) => {
                    visit(CandidateModule::new(&self.config.directory, path, ext))?
                }
                EntryKind::Ignored => {}
            }
        }

        if self.config.follow_symlinks {
            ancestors.pop();
        }
        Ok(())
    }

    fn read_entries(&self, dir: &Path) -> RouterResult<Vec<DirEntry>> {
        let mut entries = fs::read_dir(dir)
            .map_err(fs_error(dir))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(fs_error(dir))?;

        if self.config.sort_entries {
            entries.sort_by_key(|entry| entry.file_name());
        }
        Ok(entries)
    }

    fn classify_entry(&self, entry: &DirEntry, path: &Path) -> RouterResult<EntryKind> {
        let file_type = entry.file_type().map_err(fs_error(path))?;

        let (is_dir, is_file) = if file_type.is_symlink() {
            if !self.config.follow_symlinks {
                return Ok(EntryKind::Ignored);
            }
            // Dangling links fail here, like any unreadable entry.
            let metadata = fs::metadata(path).map_err(fs_error(path))?;
            (metadata.is_dir(), metadata.is_file())
        } else {
            (file_type.is_dir(), file_type.is_file())
        };

        Ok(classify(
            &entry.file_name(),
            is_dir,
            is_file,
            &self.config.extensions,
        ))
    }
}
