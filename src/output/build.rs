// Static site builder
//
// Writes one HTML file per page into the build directory and copies the
// static asset directories next to them.

use crate::config::Config;
use crate::error::Result;
use crate::guide::{Guide, INDEX_FILENAME};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Writes a rendered guide to disk
pub struct SiteBuilder<'a> {
    config: &'a Config,
}

impl<'a> SiteBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Build the complete static site.
    ///
    /// The build directory is recreated from scratch. The first failure
    /// aborts the build; files already written stay where they are.
    pub fn build(&self, guide: &Guide) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        ensure_dir(&self.config.build_dir, true)?;

        for (key, html) in guide.render_all()? {
            let path = self.config.build_dir.join(output_file_name(&key));
            debug!(page = %key, path = %path.display(), "writing page");
            fs::write(&path, html)?;
            report.pages_written += 1;
        }

        report.static_files_copied = self.collect_static()?;

        info!(
            pages = report.pages_written,
            static_files = report.static_files_copied,
            dir = %self.config.build_dir.display(),
            "build finished"
        );
        Ok(report)
    }

    /// Copy every static directory into `{build_dir}/{static_root}`
    pub fn collect_static(&self) -> Result<usize> {
        let dest = self.static_dest();
        let mut copied = 0;

        for src in &self.config.static_dirs {
            if !src.is_dir() {
                warn!(dir = %src.display(), "static directory not found, skipping");
                continue;
            }
            copied += copy_dir(src, &dest)?;
        }

        Ok(copied)
    }

    fn static_dest(&self) -> PathBuf {
        self.config.build_dir.join(&self.config.static_root)
    }
}

/// Report of what was written
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub pages_written: usize,
    pub static_files_copied: usize,
}

impl BuildReport {
    pub fn summary(&self) -> String {
        format!(
            "Wrote {} pages, copied {} static files",
            self.pages_written, self.static_files_copied
        )
    }
}

/// Output file name for a rendered page key
pub fn output_file_name(key: &str) -> String {
    let name = key.to_lowercase();
    let name = name.trim_matches('/');
    let name = if name.is_empty() { INDEX_FILENAME } else { name };
    format!("{}.html", name)
}

/// Create `dir`, removing it first when `remove` is set
pub fn ensure_dir(dir: &Path, remove: bool) -> Result<()> {
    if remove && dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Recursively copy `src` into `dest`, never overwriting existing files.
///
/// Returns the number of files copied.
pub fn copy_dir(src: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if !target.exists() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}
