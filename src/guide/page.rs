// Pages: addressable output units made of sections

use crate::guide::section::Section;
use crate::output::templates::{Context, ToContext};
use crate::parser::DocRecord;
use minijinja::value::Value;

/// Filename of the overview page, served at `/`
pub const INDEX_FILENAME: &str = "index";

/// One output document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Lowercased; the registry key and the basis of URL and output file
    pub filename: String,
    /// Display name
    pub name: String,
    /// Sections in discovery order
    pub sections: Vec<Section>,
    /// Content template identifier, without extension
    pub template: String,
    page_ext: String,
}

impl Page {
    pub fn new(filename: &str, name: &str, template: &str, page_ext: &str) -> Self {
        Self {
            filename: filename.to_lowercase(),
            name: name.to_string(),
            sections: Vec::new(),
            template: template.to_string(),
            page_ext: page_ext.to_string(),
        }
    }

    /// URL path of this page
    pub fn url(&self) -> String {
        if !self.page_ext.is_empty() {
            return format!("/{}{}", self.filename, self.page_ext);
        }

        if self.filename == INDEX_FILENAME {
            "/".to_string()
        } else {
            format!("/{}/", self.filename)
        }
    }

    /// Append a section built from a parsed record
    pub fn add_section(&mut self, record: &DocRecord) -> &mut Section {
        let section = Section::from_record(&self.filename, record);
        self.sections.push(section);
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    pub fn is_index(&self) -> bool {
        self.filename == INDEX_FILENAME
    }
}

impl ToContext for Page {
    fn to_context(&self) -> Context {
        Context::from([
            ("filename".to_string(), Value::from(self.filename.as_str())),
            ("name".to_string(), Value::from(self.name.as_str())),
            ("url".to_string(), Value::from(self.url())),
            ("sections".to_string(), Value::from_serialize(&self.sections)),
            ("sections_count".to_string(), Value::from(self.sections.len())),
        ])
    }
}
