//! Path-to-prefix derivation.
//!
//! Pure functions only: nothing here touches the filesystem or loads modules,
//! so the convention can be exercised without a directory tree.
//!
//! ```text
//! routes/route.toml          → /
//! routes/admin/route.toml    → /admin
//! routes/admin/users.rs      → /admin/users
//! routes/users/{id}/route.rs → /users/{id}
//! ```

use std::path::Path;

use crate::routing::types::{RouterError, RouterResult};

/// File stem that mounts at its directory's prefix.
pub const RESERVED_STEM: &str = "route";

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\' || std::path::is_separator(c)
}

/// Strip one trailing `.ext` for a recognized extension.
fn strip_extension<'a>(path: &'a str, extensions: &[String]) -> &'a str {
    extensions
        .iter()
        .find_map(|ext| {
            path.strip_suffix(ext.as_str())
                .and_then(|rest| rest.strip_suffix('.'))
        })
        .unwrap_or(path)
}

/// Derive the mount prefix for a path relative to the routes root.
///
/// Empty segments from leading or doubled separators are discarded, and a
/// final `route` segment is dropped. No segments at all yields `/`.
pub fn prefix_from_relative(relative: &str, extensions: &[String]) -> String {
    let stem = strip_extension(relative, extensions);

    let mut segments: Vec<&str> = stem.split(is_separator).filter(|s| !s.is_empty()).collect();

    if segments.last() == Some(&RESERVED_STEM) {
        segments.pop();
    }

    format!("/{}", segments.join("/"))
}

/// Derive the mount prefix for `path`, which must live under `root`.
pub fn derive_prefix(root: &Path, path: &Path, extensions: &[String]) -> RouterResult<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| RouterError::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("not under {}", root.display()),
        })?;

    let relative = relative.to_str().ok_or_else(|| RouterError::InvalidPath {
        path: path.to_path_buf(),
        reason: "path is not valid UTF-8".to_string(),
    })?;

    Ok(prefix_from_relative(relative, extensions))
}

/// Check that a derived prefix can be handed to the dispatcher.
///
/// Segments are passed through verbatim, so `{name}` becomes a capture.
/// Wildcards and legacy `:name`/`*name` segments cannot be nested.
pub fn check_mountable(prefix: &str) -> Result<(), String> {
    check_segments(prefix, false)
}

/// Check a path declared inside a module before it reaches the dispatcher.
///
/// Same capture rules as [`check_mountable`], except that a `{*name}`
/// wildcard may close the path.
pub fn check_route_path(path: &str) -> Result<(), String> {
    if !path.starts_with('/') {
        return Err(format!("route path '{}' must start with '/'", path));
    }
    check_segments(path, true)
}

fn check_segments(path: &str, allow_wildcard: bool) -> Result<(), String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut captures: Vec<&str> = Vec::new();

    for (index, segment) in segments.iter().enumerate() {
        if segment.starts_with(':') || segment.starts_with('*') {
            return Err(format!(
                "segment '{}' must use {{capture}} syntax",
                segment
            ));
        }

        if !segment.contains(['{', '}']) {
            continue;
        }

        let name = segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .filter(|s| !s.contains(['{', '}']))
            .ok_or_else(|| format!("segment '{}' mixes a capture with literal text", segment))?;

        let name = match name.strip_prefix('*') {
            Some(_) if !allow_wildcard => {
                return Err(format!("wildcard segment '{}' cannot be nested", segment));
            }
            Some(_) if index + 1 != segments.len() => {
                return Err(format!("wildcard segment '{}' must be last", segment));
            }
            Some(rest) => rest,
            None => name,
        };

        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(format!("segment '{}' is not a valid capture", segment));
        }
        if captures.contains(&name) {
            return Err(format!("capture '{}' appears more than once", name));
        }
        captures.push(name);
    }

    Ok(())
}

/// Key under which two prefixes collide in the dispatcher.
///
/// Captures match any segment, so `/users/{id}` and `/users/{name}` share a key.
pub(crate) fn collision_key(prefix: &str) -> String {
    prefix
        .split('/')
        .map(|segment| if segment.starts_with('{') { "{}" } else { segment })
        .collect::<Vec<_>>()
        .join("/")
}
