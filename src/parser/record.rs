// KSS documentation records
//
// A comment block is a KSS section when its last paragraph is a
// `Styleguide <reference>` line. Paragraphs are separated by blank lines.

use serde::Serialize;

/// One documented component, as parsed from a KSS comment block
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DocRecord {
    /// Dotted reference, e.g. `2.1.3`
    pub reference: String,
    /// First line of the description
    pub name: String,
    /// Markdown description, modifiers and reference excluded
    pub description: String,
    /// Modifiers in source order
    pub modifiers: Vec<RawModifier>,
}

/// A `name - description` modifier line
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RawModifier {
    pub name: String,
    pub description: String,
}

impl DocRecord {
    /// Create a record with no modifiers
    pub fn new(reference: &str, name: &str, description: &str) -> Self {
        Self {
            reference: reference.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            modifiers: Vec::new(),
        }
    }

    /// Add a modifier
    pub fn with_modifier(mut self, name: &str, description: &str) -> Self {
        self.modifiers.push(RawModifier {
            name: name.to_string(),
            description: description.to_string(),
        });
        self
    }

    /// First dotted segment of the reference
    pub fn grouping_key(&self) -> &str {
        self.reference.split('.').next().unwrap_or_default()
    }
}

/// Parse one comment block. Returns `None` for ordinary comments.
pub fn parse_block(comment: &str) -> Option<DocRecord> {
    let paragraphs = split_paragraphs(comment);
    let (last, body) = paragraphs.split_last()?;

    let reference = parse_reference(last)?;
    let (first, rest) = body.split_first()?;

    let name = first.first().map(|l| l.trim().to_string()).unwrap_or_default();

    let mut modifiers = None;
    let mut description = vec![first.join("\n")];
    for paragraph in rest {
        if modifiers.is_none() && is_modifier_paragraph(paragraph) {
            modifiers = Some(parse_modifiers(paragraph));
        } else {
            description.push(paragraph.join("\n"));
        }
    }

    Some(DocRecord {
        reference,
        name,
        description: description.join("\n\n"),
        modifiers: modifiers.unwrap_or_default(),
    })
}

fn split_paragraphs(comment: &str) -> Vec<Vec<&str>> {
    let mut paragraphs = Vec::new();
    let mut current = Vec::new();

    for line in comment.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs
}

/// `Styleguide 2.1.3.` -> `2.1.3`
fn parse_reference(paragraph: &[&str]) -> Option<String> {
    let [line] = paragraph else {
        return None;
    };

    let line = line.trim();
    let keyword = line.get(..10)?;
    if !keyword.eq_ignore_ascii_case("styleguide") {
        return None;
    }

    let rest = &line[10..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let reference = rest.trim().trim_end_matches('.');
    if reference.is_empty() {
        None
    } else {
        Some(reference.to_string())
    }
}

fn split_modifier_line(line: &str) -> Option<(&str, &str)> {
    let (name, description) = line.split_once(" - ")?;
    let name = name.trim_end();
    let valid = (name.starts_with('.') || name.starts_with(':'))
        && name.len() > 1
        && !name.contains(char::is_whitespace);
    valid.then_some((name, description.trim()))
}

fn is_continuation(line: &str) -> bool {
    line.starts_with(char::is_whitespace)
}

fn is_modifier_paragraph(paragraph: &[&str]) -> bool {
    match paragraph.first() {
        Some(first) if split_modifier_line(first).is_some() => paragraph
            .iter()
            .all(|line| is_continuation(line) || split_modifier_line(line).is_some()),
        _ => false,
    }
}

fn parse_modifiers(paragraph: &[&str]) -> Vec<RawModifier> {
    let mut modifiers: Vec<RawModifier> = Vec::new();

    for line in paragraph {
        if is_continuation(line) {
            if let Some(last) = modifiers.last_mut() {
                last.description.push(' ');
                last.description.push_str(line.trim());
            }
        } else if let Some((name, description)) = split_modifier_line(line) {
            modifiers.push(RawModifier {
                name: name.to_string(),
                description: description.to_string(),
            });
        }
    }

    modifiers
}
