// Template composition: content rendered first, then wrapped in a layout
//
// Undefined variables render as empty strings, at any depth, so templates
// can reference keys a page does not supply.

use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::paths::find;
use minijinja::value::{Kwargs, Value};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Key the rendered content is bound to when rendering the layout
pub const CONTENT_VAR: &str = "content";

/// Template variables by name
pub type Context = BTreeMap<String, Value>;

/// Anything that contributes keys to a template context
pub trait ToContext {
    fn to_context(&self) -> Context;
}

impl ToContext for Context {
    fn to_context(&self) -> Context {
        self.clone()
    }
}

/// Merge contexts in order; later keys overwrite earlier ones
pub fn merge_contexts(contexts: &[&dyn ToContext]) -> Context {
    let mut merged = Context::new();
    for context in contexts {
        merged.extend(context.to_context());
    }
    merged
}

/// A template environment with the guide's filters and no autoescaping
pub fn new_env() -> Environment<'static> {
    let mut env = Environment::new();
    // Descriptions and examples are already HTML
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_undefined_behavior(UndefinedBehavior::Chainable);
    env.add_filter("pluralize", pluralize);
    env.add_filter("slugify", slugify_filter);
    env
}

/// Renders a content template inside a layout template
pub struct TemplateComposer<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> TemplateComposer<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Render `content_name` then `layout_name`, both looked up in `dirs`.
    ///
    /// The layout sees the merged context plus `content`.
    pub fn render(
        &self,
        dirs: &[PathBuf],
        layout_name: &str,
        content_name: &str,
        contexts: &[&dyn ToContext],
    ) -> Result<String> {
        let mut env = new_env();
        self.load(&mut env, dirs, layout_name)?;
        self.load(&mut env, dirs, content_name)?;

        let mut context = merge_contexts(contexts);
        let content = render_template(&env, content_name, &context)?;

        context.insert(CONTENT_VAR.to_string(), Value::from(content));
        render_template(&env, layout_name, &context)
    }

    /// Resolve, read and parse one template into `env` under `name`
    fn load(
        &self,
        env: &mut Environment<'static>,
        dirs: &[PathBuf],
        name: &str,
    ) -> Result<PathBuf> {
        let path = find(self.fs, dirs, name).map_err(|e| match e {
            Error::FileNotFound { .. } => Error::TemplateNotFound(name.to_string()),
            other => other,
        })?;

        let source = self.fs.read_to_string(&path)?;
        add_template(env, name, &path, &source)?;
        Ok(path)
    }
}

/// Parse `source` into `env`, reporting syntax errors against `path`
pub fn add_template(
    env: &mut Environment<'static>,
    name: &str,
    path: &Path,
    source: &str,
) -> Result<()> {
    env.add_template_owned(name.to_string(), source.to_string())
        .map_err(|e| Error::template_parse(path, crate::error::error_chain(&e)))
}

/// Render a template already added to `env`
pub fn render_template(env: &Environment<'_>, name: &str, context: &Context) -> Result<String> {
    Ok(env.get_template(name)?.render(context)?)
}

/// Pluralize a word based on count
fn pluralize(count: Value, kwargs: Kwargs) -> std::result::Result<String, minijinja::Error> {
    let count = count.as_usize().unwrap_or(0);
    let singular: Option<String> = kwargs.get("singular")?;
    let plural: Option<String> = kwargs.get("plural")?;
    kwargs.assert_all_used()?;

    let singular = singular.unwrap_or_else(|| "item".to_string());
    let plural = plural.unwrap_or_else(|| format!("{}s", singular));

    if count == 1 {
        Ok(format!("{} {}", count, singular))
    } else {
        Ok(format!("{} {}", count, plural))
    }
}

/// Convert text to URL-friendly slug
fn slugify_filter(value: Value) -> String {
    slugify(&value.to_string())
}

/// Convert text to URL-friendly slug, e.g. for section anchors
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
