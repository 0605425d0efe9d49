// Markdown to HTML for section descriptions

use pulldown_cmark::{html::push_html, Options, Parser};

/// Render markdown source to HTML
pub fn markdownify(source: &str) -> String {
    let options = Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH;

    let parser = Parser::new_ext(source, options);
    let mut html = String::with_capacity(source.len() * 2);
    push_html(&mut html, parser);
    html
}
