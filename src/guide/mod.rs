//! The guide registry.
//!
//! A [`Guide`] owns every [`Page`] of one run. It is populated from parsed
//! KSS records, gets its examples attached once, and is then only read:
//! pages and static assets are rendered on demand by request path.

pub mod page;
pub mod section;

pub use page::{Page, INDEX_FILENAME};
pub use section::{Modifier, Section, MODIFIER_CLASS_VAR};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::output::templates::{add_template, new_env, Context, TemplateComposer, ToContext};
use crate::parser::{self, DocRecord};
use crate::paths::{find, split_ext};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use minijinja::value::Value;
use tracing::{debug, info, warn};

/// Content template used for pages built from KSS sections
pub const STYLEGUIDE_TEMPLATE: &str = "styleguide";

/// Content template used for the overview page
pub const INDEX_TEMPLATE: &str = "index";

/// One entry of the navigation list
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavItem {
    pub name: String,
    pub url: String,
    pub number: usize,
    pub is_active: bool,
}

/// Navigation relative to the page being rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nav {
    pub items: Vec<NavItem>,
}

impl ToContext for Nav {
    fn to_context(&self) -> Context {
        Context::from([("nav".to_string(), Value::from_serialize(&self.items))])
    }
}

/// Output of [`Guide::render`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Page(String),
    Static(Vec<u8>),
}

impl Rendered {
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Rendered::Page(html) => html.into_bytes(),
            Rendered::Static(bytes) => bytes,
        }
    }
}

/// A failed [`Guide::render_all`], with the pages rendered before the failure
#[derive(Debug, thiserror::Error)]
#[error("rendering stopped after {} pages: {source}", .rendered.len())]
pub struct RenderAllError {
    pub rendered: Vec<(String, String)>,
    pub source: Error,
}

impl From<RenderAllError> for Error {
    fn from(err: RenderAllError) -> Self {
        err.source
    }
}

/// Every page of a style guide
pub struct Guide {
    config: Config,
    fs: Arc<dyn FileSystem>,
    pages: Vec<Page>,
    index: HashMap<String, usize>,
}

impl Guide {
    /// Create a guide holding only the overview page
    pub fn new(config: Config, fs: Arc<dyn FileSystem>) -> Self {
        let mut guide = Self {
            config,
            fs,
            pages: Vec::new(),
            index: HashMap::new(),
        };
        guide.add_page(INDEX_FILENAME, "Overview", INDEX_TEMPLATE);
        guide
    }

    /// Build a complete guide: parse sources, group sections, attach examples
    pub fn from_config(config: Config, fs: Arc<dyn FileSystem>) -> Result<Self> {
        let records = parser::parse_dirs(fs.as_ref(), &config.source_dirs)?;
        let example_dirs = config.example_dirs.clone();

        let mut guide = Self::new(config, fs);
        for record in &records {
            guide.add_page_section(&record.reference, record);
        }
        guide.load_examples(&example_dirs)?;

        info!(
            pages = guide.pages.len(),
            sections = records.len(),
            "style guide loaded"
        );
        Ok(guide)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Pages in registry order, overview first
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Look up a page by filename, case-insensitively
    pub fn page(&self, filename: &str) -> Option<&Page> {
        self.index
            .get(&filename.to_lowercase())
            .map(|&i| &self.pages[i])
    }

    /// Register a page, or return the one already registered under `filename`
    pub fn add_page(&mut self, filename: &str, name: &str, template: &str) -> &mut Page {
        let key = filename.to_lowercase();

        let position = match self.index.get(&key).copied() {
            Some(position) => position,
            None => {
                debug!(page = %key, "adding page");
                self.pages
                    .push(Page::new(&key, name, template, &self.config.page_ext));
                self.index.insert(key, self.pages.len() - 1);
                self.pages.len() - 1
            }
        };

        &mut self.pages[position]
    }

    /// Add a section to the page named by the first segment of `grouping_key`
    pub fn add_page_section(&mut self, grouping_key: &str, record: &DocRecord) -> &mut Page {
        let name = grouping_key.split('.').next().unwrap_or_default();
        let page = self.add_page(name, name, STYLEGUIDE_TEMPLATE);
        page.add_section(record);
        page
    }

    /// Attach example templates to sections by lowercased reference.
    ///
    /// Every file below the given directories is an example keyed by its
    /// lowercased stem; the first file found for a stem wins. Sections
    /// without a matching example keep empty examples.
    pub fn load_examples(&mut self, dirs: &[PathBuf]) -> Result<()> {
        let mut examples = new_env();
        let mut found: HashMap<String, PathBuf> = HashMap::new();

        for dir in dirs {
            if !self.fs.is_dir(dir) {
                warn!(dir = %dir.display(), "example directory not found, skipping");
                continue;
            }

            for path in self.fs.walk_files(dir)? {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let key = split_ext(&file_name).0.to_lowercase();

                if let Some(first) = found.get(&key) {
                    warn!(
                        example = %path.display(),
                        kept = %first.display(),
                        "duplicate example ignored"
                    );
                    continue;
                }

                let source = match self.fs.read_to_string(&path) {
                    Ok(source) => source,
                    Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                        warn!(example = %path.display(), "example is not UTF-8, skipping");
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };
                add_template(&mut examples, &key, &path, &source)?;
                found.insert(key, path);
            }
        }

        for page in &mut self.pages {
            for section in &mut page.sections {
                let key = section.example_key();
                if found.contains_key(&key) {
                    debug!(reference = %section.reference, "attaching example");
                    section.attach_example(&examples, &key)?;
                }
            }
        }

        Ok(())
    }

    /// Navigation list with `active` marked
    pub fn nav(&self, active: &Page) -> Nav {
        let items = self
            .pages
            .iter()
            .enumerate()
            .map(|(number, page)| NavItem {
                name: page.name.clone(),
                url: page.url(),
                number,
                is_active: page.filename == active.filename,
            })
            .collect();

        Nav { items }
    }

    /// Render the page addressed by a request path such as `/2/`
    pub fn render_page(&self, path: &str) -> Result<String> {
        let key = self.page_key(path);
        let page = self
            .page(&key)
            .ok_or_else(|| Error::PageNotFound(path.to_string()))?;

        debug!(page = %page.filename, "rendering page");

        let ext = &self.config.template_ext;
        let layout = format!("layout{}", ext);
        let content = format!("{}{}", page.template, ext);

        let nav = self.nav(page);
        let statics = Context::from([(
            "static_url".to_string(),
            Value::from(self.config.static_url.as_str()),
        )]);

        TemplateComposer::new(self.fs.as_ref()).render(
            &self.config.template_dirs,
            &layout,
            &content,
            &[&nav, &statics, page],
        )
    }

    /// Read a static asset addressed by a request path under the static URL
    pub fn render_static(&self, path: &str) -> Result<Vec<u8>> {
        let relative = path
            .strip_prefix(self.config.static_url.as_str())
            .unwrap_or(path);

        let full_path = find(self.fs.as_ref(), &self.config.static_dirs, relative).map_err(
            |e| match e {
                Error::FileNotFound { .. } => Error::StaticNotFound(path.to_string()),
                other => other,
            },
        )?;

        Ok(self.fs.read(&full_path)?)
    }

    /// Render a page or static asset, depending on the path
    pub fn render(&self, path: &str) -> Result<Rendered> {
        if self.is_static_path(path) {
            self.render_static(path).map(Rendered::Static)
        } else {
            self.render_page(path).map(Rendered::Page)
        }
    }

    /// Render every page in registry order, stopping at the first failure
    pub fn render_all(&self) -> std::result::Result<Vec<(String, String)>, RenderAllError> {
        let mut rendered = Vec::with_capacity(self.pages.len());

        for page in &self.pages {
            match self.render_page(&page.filename) {
                Ok(html) => rendered.push((page.filename.clone(), html)),
                Err(source) => return Err(RenderAllError { rendered, source }),
            }
        }

        Ok(rendered)
    }

    fn is_static_path(&self, path: &str) -> bool {
        let prefix = self.config.static_url.trim_end_matches('/');
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Request path -> registry key
    fn page_key(&self, path: &str) -> String {
        let mut key = path.trim_matches('/');
        let ext = self.config.page_ext.as_str();
        if !ext.is_empty() {
            key = key.strip_suffix(ext).unwrap_or(key).trim_matches('/');
        }

        if key.is_empty() {
            INDEX_FILENAME.to_string()
        } else {
            key.to_lowercase()
        }
    }
}
