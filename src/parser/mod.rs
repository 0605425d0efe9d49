// KSS parser: stylesheet sources -> documentation records

mod comments;
mod record;

pub use comments::extract_comments;
pub use record::{parse_block, DocRecord, RawModifier};

use crate::error::Result;
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Stylesheet extensions scanned for KSS comments
pub const STYLESHEET_EXTENSIONS: &[&str] = &["css", "less", "scss", "sass", "styl"];

/// Parse every KSS block in a stylesheet, in source order
pub fn parse_source(source: &str) -> Vec<DocRecord> {
    extract_comments(source)
        .iter()
        .filter_map(|comment| parse_block(comment))
        .collect()
}

/// Parse every stylesheet below the given directories.
///
/// Directories are scanned in order and files in sorted order, so the
/// records come back in a stable discovery order. Missing directories are
/// skipped with a warning.
pub fn parse_dirs(fs: &dyn FileSystem, dirs: &[PathBuf]) -> Result<Vec<DocRecord>> {
    let mut records = Vec::new();

    for dir in dirs {
        if !fs.is_dir(dir) {
            warn!(dir = %dir.display(), "source directory not found, skipping");
            continue;
        }

        for path in fs.walk_files(dir)? {
            if !is_stylesheet(&path) {
                continue;
            }

            let source = fs.read_to_string(&path)?;
            let parsed = parse_source(&source);
            debug!(file = %path.display(), sections = parsed.len(), "parsed stylesheet");
            records.extend(parsed);
        }
    }

    Ok(records)
}

fn is_stylesheet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| STYLESHEET_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
