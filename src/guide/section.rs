// Documented components and their modifiers

use crate::error::Result;
use crate::markdown::markdownify;
use crate::output::templates::{render_template, Context};
use crate::parser::{DocRecord, RawModifier};
use minijinja::value::Value;
use minijinja::Environment;
use serde::Serialize;

/// Placeholder variable example templates use for the modifier class
pub const MODIFIER_CLASS_VAR: &str = "modifier_class";

/// One variant of a component, e.g. `.primary` or `:hover`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Modifier {
    pub name: String,
    pub description: String,
    /// Selector form: `.primary`, or `:hover` for pseudo-states
    pub class_name: String,
    /// Rendered example, empty until one is attached
    pub example: String,
}

impl Modifier {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            class_name: class_name(name),
            example: String::new(),
        }
    }

    /// Value substituted for `modifier_class` in example templates.
    ///
    /// This is the class attribute form with a leading space, so templates
    /// can write `class="btn{{ modifier_class }}"`.
    pub fn modifier_class(&self) -> String {
        let classes = match self.name.strip_prefix(':') {
            Some(state) => format!("pseudo-class-{}", state.replace(':', " pseudo-class-")),
            None => self.name.trim_start_matches('.').replace('.', " "),
        };
        format!(" {}", classes)
    }

    /// Render the example template with this modifier's class
    pub fn attach_example(&mut self, examples: &Environment<'_>, key: &str) -> Result<()> {
        let context = example_context(&self.modifier_class());
        self.example = render_template(examples, key, &context)?;
        Ok(())
    }
}

fn example_context(modifier_class: &str) -> Context {
    Context::from([(MODIFIER_CLASS_VAR.to_string(), Value::from(modifier_class))])
}

/// Selector form of a modifier name
fn class_name(name: &str) -> String {
    if name.starts_with(':') {
        name.to_string()
    } else {
        format!(".{}", name.trim_start_matches('.'))
    }
}

/// One documented component
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Section {
    /// Page this section belongs to
    pub filename: String,
    pub reference: String,
    pub name: String,
    /// Description rendered to HTML
    pub description: String,
    pub modifiers: Vec<Modifier>,
    pub modifiers_count: usize,
    /// Rendered example, empty until one is attached
    pub example: String,
}

impl Section {
    /// Build a section from a parsed record; the description is rendered here
    pub fn from_record(filename: &str, record: &DocRecord) -> Self {
        let modifiers: Vec<Modifier> = record
            .modifiers
            .iter()
            .map(|RawModifier { name, description }| Modifier::new(name, description))
            .collect();

        Self {
            filename: filename.to_string(),
            reference: record.reference.clone(),
            name: record.name.clone(),
            description: markdownify(&record.description),
            modifiers_count: modifiers.len(),
            modifiers,
            example: String::new(),
        }
    }

    /// Lowercased reference used to look up example templates
    pub fn example_key(&self) -> String {
        self.reference.to_lowercase()
    }

    /// Render the example once bare and once per modifier
    pub fn attach_example(&mut self, examples: &Environment<'_>, key: &str) -> Result<()> {
        self.example = render_template(examples, key, &example_context(""))?;

        for modifier in &mut self.modifiers {
            modifier.attach_example(examples, key)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::templates::new_env;

    fn example_env(source: &'static str) -> Environment<'static> {
        let mut env = new_env();
        env.add_template("1.1", source).unwrap();
        env
    }

    #[test]
    fn test_class_name() {
        assert_eq!(Modifier::new("primary", "").class_name, ".primary");
        assert_eq!(Modifier::new(".primary", "").class_name, ".primary");
        assert_eq!(Modifier::new(":hover", "").class_name, ":hover");
    }

    #[test]
    fn test_modifier_class() {
        assert_eq!(Modifier::new(".primary", "").modifier_class(), " primary");
        assert_eq!(Modifier::new(".btn.large", "").modifier_class(), " btn large");
        assert_eq!(Modifier::new(":hover", "").modifier_class(), " pseudo-class-hover");
        assert_eq!(
            Modifier::new(":focus:hover", "").modifier_class(),
            " pseudo-class-focus pseudo-class-hover"
        );
    }

    #[test]
    fn test_from_record() {
        let record = DocRecord::new("1.1", "Buttons", "Buttons\n\nA *button*.")
            .with_modifier(".primary", "Main")
            .with_modifier(":hover", "Hovered");
        let section = Section::from_record("1", &record);

        assert_eq!(section.filename, "1");
        assert_eq!(section.reference, "1.1");
        assert!(section.description.contains("<em>button</em>"));
        assert_eq!(section.modifiers_count, 2);
        assert!(section.example.is_empty());
        assert!(section.modifiers.iter().all(|m| m.example.is_empty()));
    }

    #[test]
    fn test_attach_example() {
        let record = DocRecord::new("1.1", "Buttons", "Buttons")
            .with_modifier(".primary", "Main")
            .with_modifier(":hover", "Hovered");
        let mut section = Section::from_record("1", &record);

        let env = example_env(r#"<a class="btn{{ modifier_class }}">Go</a>"#);
        section.attach_example(&env, "1.1").unwrap();

        assert_eq!(section.example, r#"<a class="btn">Go</a>"#);
        assert_eq!(section.modifiers[0].example, r#"<a class="btn primary">Go</a>"#);
        assert_eq!(
            section.modifiers[1].example,
            r#"<a class="btn pseudo-class-hover">Go</a>"#
        );
    }

    #[test]
    fn test_example_key_lowercase() {
        let section = Section::from_record("forms", &DocRecord::new("Forms.Input", "Input", ""));
        assert_eq!(section.example_key(), "forms.input");
    }

    #[test]
    fn test_example_with_unknown_keys() {
        let mut section = Section::from_record(
            "1",
            &DocRecord::new("1.1", "Buttons", "").with_modifier(".primary", "Main"),
        );
        let env = example_env(
            r#"<a class="btn{{ modifier_class }}" title="{{ title }}">{{ label.text }}</a>"#,
        );

        section.attach_example(&env, "1.1").unwrap();
        assert_eq!(section.example, r#"<a class="btn" title=""></a>"#);
        assert_eq!(section.modifiers[0].example, r#"<a class="btn primary" title=""></a>"#);
    }
}
