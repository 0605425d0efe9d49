// Starter project scaffolding for `kss create`

use crate::error::{Error, Result};
use crate::paths::expand;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the config file in a new project
pub const CONFIG_FILENAME: &str = "kss.yml";

/// Files of the starter project, relative to the project root
const PROJECT_FILES: &[(&str, &str)] = &[
    (CONFIG_FILENAME, include_str!("../project/kss.yml")),
    ("templates/layout.html", include_str!("../project/templates/layout.html")),
    ("templates/index.html", include_str!("../project/templates/index.html")),
    (
        "templates/styleguide.html",
        include_str!("../project/templates/styleguide.html"),
    ),
    ("css/buttons.css", include_str!("../project/css/buttons.css")),
    ("examples/1.1.html", include_str!("../project/examples/1.1.html")),
    ("examples/1.2.html", include_str!("../project/examples/1.2.html")),
    ("static/styleguide.css", include_str!("../project/static/styleguide.css")),
];

/// Create a new project at `dest`, which must not exist yet.
///
/// Returns the expanded project directory.
pub fn create(dest: &Path) -> Result<PathBuf> {
    let dest = expand(dest)?;
    if dest.exists() {
        return Err(Error::AlreadyExists(dest));
    }

    fs::create_dir_all(&dest)?;

    for (name, contents) in PROJECT_FILES {
        let path = dest.join(name);
        if is_hidden(&path) {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!(file = %path.display(), "writing project file");
        fs::write(&path, contents)?;
    }

    Ok(dest)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fs::OsFileSystem;
    use crate::guide::Guide;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_create_writes_project() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("guide");

        let created = create(&dest).unwrap();
        assert_eq!(created, dest);
        for (name, _) in PROJECT_FILES {
            assert!(dest.join(name).is_file(), "missing {name}");
        }
    }

    #[test]
    fn test_create_refuses_existing_dir() {
        let dir = TempDir::new().unwrap();
        let err = create(dir.path()).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
    }

    #[test]
    fn test_starter_project_renders() {
        let dir = TempDir::new().unwrap();
        let dest = create(&dir.path().join("guide")).unwrap();

        let config = Config::load(&dest.join(CONFIG_FILENAME)).unwrap();
        let guide = Guide::from_config(config, Arc::new(OsFileSystem)).unwrap();

        let html = guide.render_page("/1/").unwrap();
        assert!(html.contains("Buttons"));
        assert!(html.contains("<code>.primary</code>"));
        assert!(html.contains(r#"<button class="button primary">Save changes</button>"#));
        assert!(html.contains(r#"<button class="button pseudo-class-hover">"#));

        let css = guide.render_static("/static/buttons.css").unwrap();
        assert!(String::from_utf8(css).unwrap().contains(".button.primary"));
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(Path::new("/p/.gitignore")));
        assert!(!is_hidden(Path::new("/p/kss.yml")));
    }
}
