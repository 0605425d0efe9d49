// Integration tests for kss-guide

use assert_cmd::Command;
use kss_guide::{Config, DocRecord, Error, Guide, MemoryFileSystem};
use predicates::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn memory_guide(fs: MemoryFileSystem) -> Guide {
    let config = Config {
        template_dirs: vec![PathBuf::from("/templates")],
        static_dirs: vec![PathBuf::from("/static")],
        source_dirs: vec![PathBuf::from("/css")],
        example_dirs: vec![PathBuf::from("/examples")],
        ..Config::default()
    };
    Guide::new(config, Arc::new(fs))
}

fn templates() -> MemoryFileSystem {
    MemoryFileSystem::new()
        .with_file("/templates/layout.html", "<html>{{ content }}</html>")
        .with_file("/templates/index.html", "{{ name }}")
        .with_file(
            "/templates/styleguide.html",
            "{% for section in sections %}{{ section.name }}\
             {% for modifier in section.modifiers %} {{ modifier.class_name }}{% endfor %}\
             {% endfor %}",
        )
}

fn kss() -> Command {
    Command::cargo_bin("kss").expect("binary should build")
}

// ============================================================================
// Guide Tests
// ============================================================================

#[test]
fn test_render_all_end_to_end() {
    let mut guide = memory_guide(templates());
    guide.add_page_section(
        "1.1",
        &DocRecord::new("1.1", "Buttons", "Buttons").with_modifier("primary", "Main action"),
    );

    let rendered = guide.render_all().expect("render should succeed");
    let (_, html) = rendered
        .iter()
        .find(|(key, _)| key == "1")
        .expect("page 1 should be rendered");

    assert!(html.contains("Buttons"));
    assert!(html.contains(".primary"));
}

#[test]
fn test_sections_share_page_in_record_order() {
    let mut guide = memory_guide(templates());
    let records = [
        DocRecord::new("2.2", "Selects", ""),
        DocRecord::new("2.1", "Inputs", ""),
        DocRecord::new("3.1", "Tables", ""),
        DocRecord::new("2.10", "Textareas", ""),
    ];
    for record in &records {
        guide.add_page_section(&record.reference, record);
    }

    let page = guide.page("2").expect("page 2 exists");
    let names: Vec<_> = page.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Selects", "Inputs", "Textareas"]);
    assert_eq!(guide.pages().len(), 3);
}

#[test]
fn test_guide_from_sources() {
    let fs = templates()
        .with_file(
            "/css/forms.scss",
            "// Text inputs\n//\n// .large - Bigger input\n//\n// Styleguide Forms.1\n.input {}\n",
        )
        .with_file("/examples/forms.1.html", "<input class=\"input{{ modifier_class }}\">");

    let config = Config {
        template_dirs: vec![PathBuf::from("/templates")],
        source_dirs: vec![PathBuf::from("/css")],
        example_dirs: vec![PathBuf::from("/examples")],
        ..Config::default()
    };
    let guide = Guide::from_config(config, Arc::new(fs)).expect("guide should load");

    let page = guide.page("forms").expect("forms page exists");
    assert_eq!(page.name, "Forms");
    assert_eq!(page.url(), "/forms/");
    assert_eq!(page.sections[0].example, "<input class=\"input\">");
    assert_eq!(
        page.sections[0].modifiers[0].example,
        "<input class=\"input large\">"
    );

    let html = guide.render_page("/Forms/").expect("page renders");
    assert_eq!(html, "<html>Text inputs .large</html>");
}

#[test]
fn test_missing_layout_is_reported() {
    let fs = MemoryFileSystem::new().with_file("/templates/index.html", "x");
    let guide = memory_guide(fs);

    match guide.render_page("/") {
        Err(Error::TemplateNotFound(name)) => assert_eq!(name, "layout.html"),
        other => panic!("expected missing layout, got {other:?}"),
    }
}

// ============================================================================
// CLI Tests
// ============================================================================

#[test]
fn test_cli_create_and_build() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("guide");

    kss()
        .arg("create")
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created style guide project"));

    kss()
        .arg("build")
        .arg(project.join("kss.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 pages"));

    let build = project.join("build");
    let index = std::fs::read_to_string(build.join("index.html")).unwrap();
    assert!(index.contains("Overview"));

    let buttons = std::fs::read_to_string(build.join("1.html")).unwrap();
    assert!(buttons.contains("Buttons"));
    assert!(buttons.contains(r#"<button class="button danger">"#));

    assert!(build.join("static/styleguide.css").is_file());
    assert!(build.join("static/buttons.css").is_file());
}

#[test]
fn test_cli_build_custom_dir() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("guide");
    let out = dir.path().join("out");

    kss().arg("create").arg(&project).assert().success();
    kss()
        .arg("build")
        .arg(project.join("kss.yml"))
        .arg("--build-dir")
        .arg(&out)
        .arg("--page-ext")
        .arg(".html")
        .assert()
        .success();

    let index = std::fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains(r#"href="/1.html""#));
}

#[test]
fn test_cli_create_existing_dir_fails() {
    let dir = TempDir::new().unwrap();

    kss()
        .arg("create")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_cli_build_missing_config_fails() {
    let dir = TempDir::new().unwrap();

    kss()
        .arg("build")
        .arg(dir.path().join("nope.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_cli_version() {
    kss()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
