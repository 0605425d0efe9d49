//! kss-guide - Build living style guides from KSS comments
//!
//! Scans stylesheets for KSS comment blocks, groups the documented
//! sections into pages and renders them through layout and page
//! templates, either to static files or over HTTP.

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod guide;
pub mod markdown;
pub mod output;
pub mod parser;
pub mod paths;
pub mod project;

// Re-export main types
pub use config::Config;
pub use error::{Error, Result};
pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use guide::{Guide, Modifier, Page, RenderAllError, Rendered, Section};
pub use output::{BuildReport, SiteBuilder, TemplateComposer};
pub use parser::DocRecord;
