use crate::error::{Error, Result};
use crate::paths::{expand, join_all};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Style guide project configuration.
///
/// Relative directories are resolved against the directory holding the
/// config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Output directory for `build`
    pub build_dir: PathBuf,
    /// Stylesheet directories scanned for KSS comments
    pub source_dirs: Vec<PathBuf>,
    /// Example template directories
    pub example_dirs: Vec<PathBuf>,
    /// Static asset directories, searched in order
    pub static_dirs: Vec<PathBuf>,
    /// Layout and page template directories, searched in order
    pub template_dirs: Vec<PathBuf>,
    /// Name of the static directory inside `build_dir`
    pub static_root: String,
    /// URL prefix static assets are served under
    pub static_url: String,
    /// Extension of layout and page templates
    pub template_ext: String,
    /// Extension appended to page URLs, empty for directory-style URLs
    pub page_ext: String,
    /// Directory holding the config file
    #[serde(skip)]
    pub root_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("build"),
            source_dirs: vec![],
            example_dirs: vec![],
            static_dirs: vec![],
            template_dirs: vec![],
            static_root: "static".to_string(),
            static_url: "/static".to_string(),
            template_ext: ".html".to_string(),
            page_ext: String::new(),
            root_dir: PathBuf::new(),
        }
    }
}

/// Config file formats, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

impl Config {
    /// Load config from a TOML or YAML file and resolve its directories
    pub fn load(path: &Path) -> Result<Self> {
        let path = expand(path)?;
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path));
        }

        let contents = std::fs::read_to_string(&path)?;
        let mut config = Self::parse(&contents, ConfigFormat::from_path(&path))?;

        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.resolve(&root);
        config.validate()?;
        Ok(config)
    }

    /// Parse config text without resolving directories
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        let config = match format {
            ConfigFormat::Toml => toml::from_str(contents)?,
            ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
        };
        Ok(config)
    }

    /// Join every configured directory onto `root`
    pub fn resolve(&mut self, root: &Path) {
        self.root_dir = root.to_path_buf();
        self.build_dir = root.join(&self.build_dir);
        self.source_dirs = join_all(root, &self.source_dirs);
        self.example_dirs = join_all(root, &self.example_dirs);
        self.static_dirs = join_all(root, &self.static_dirs);
        self.template_dirs = join_all(root, &self.template_dirs);
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(&mut self, build_dir: Option<PathBuf>, page_ext: Option<String>) {
        if let Some(dir) = build_dir {
            self.build_dir = dir;
        }

        if let Some(ext) = page_ext {
            self.page_ext = ext;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.static_url.starts_with('/') {
            return Err(Error::config_validation("static_url must start with '/'"));
        }

        if self.static_url.trim_end_matches('/').is_empty() {
            return Err(Error::config_validation("static_url cannot be the site root"));
        }

        if self.template_ext.is_empty() {
            return Err(Error::config_validation("template_ext cannot be empty"));
        }

        if self.template_dirs.is_empty() {
            return Err(Error::config_validation(
                "at least one template directory required",
            ));
        }

        if !self.page_ext.is_empty() && !self.page_ext.starts_with('.') {
            return Err(Error::config_validation("page_ext must start with '.'"));
        }

        Ok(())
    }
}
