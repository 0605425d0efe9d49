// Path resolution helpers
//
// `find` is the lookup used for templates and static assets: an ordered
// list of directories where the first match wins.

use crate::error::{Error, Result};
use crate::fs::FileSystem;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Find `name` in the first directory of `dirs` that contains it.
///
/// `name` must stay inside the directories: names with `..` or a root
/// component never match.
pub fn find(fs: &dyn FileSystem, dirs: &[PathBuf], name: &str) -> Result<PathBuf> {
    let name = name.trim_start_matches('/');

    if !is_contained(Path::new(name)) {
        debug!(name, "rejecting path outside search directories");
        return Err(Error::file_not_found(name));
    }

    for dir in dirs {
        let full_path = dir.join(name);
        if fs.exists(&full_path)? {
            return Ok(full_path);
        }
    }

    Err(Error::file_not_found(name))
}

/// Whether a relative path only descends
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Split a path into its stem and extension (extension keeps the dot)
pub fn split_ext(path: &str) -> (&str, &str) {
    let base_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[base_start..].rfind('.') {
        Some(dot) if dot > 0 => path.split_at(base_start + dot),
        _ => (path, ""),
    }
}

/// Whether the last path component has an extension
pub fn has_ext(path: &str) -> bool {
    !split_ext(path).1.is_empty()
}

/// Add a trailing slash to paths that have neither an extension nor a slash
pub fn append_slash(path: &str) -> String {
    if !has_ext(path) && !path.ends_with('/') {
        format!("{}/", path)
    } else {
        path.to_string()
    }
}

/// Expand `~/` and make the path absolute
pub fn expand(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = PathBuf::from(shellexpand::tilde(&raw).into_owned());

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(std::env::current_dir()?.join(expanded))
    }
}

/// Join every relative path in `paths` onto `root`
pub fn join_all(root: &Path, paths: &[PathBuf]) -> Vec<PathBuf> {
    paths.iter().map(|p| root.join(p)).collect()
}
