// Comment extraction for stylesheet sources
//
// Pulls out `/* ... */` blocks and runs of consecutive `//` lines, with the
// comment markers and `*` gutters removed. Indentation inside a block is
// kept relative to its least-indented line.

/// Extract every comment block from stylesheet source, in source order
pub fn extract_comments(source: &str) -> Vec<String> {
    let mut comments = Vec::new();
    let mut line_run: Vec<String> = Vec::new();
    let mut block: Option<Vec<String>> = None;

    for line in source.lines() {
        if let Some(lines) = block.as_mut() {
            if let Some(end) = line.find("*/") {
                let body = strip_gutter(&line[..end]);
                if !body.trim().is_empty() {
                    lines.push(body);
                }
                if let Some(lines) = block.take() {
                    comments.push(normalize(lines));
                }
            } else {
                lines.push(strip_gutter(line));
            }
            continue;
        }

        let trimmed = line.trim_start();

        if let Some(rest) = trimmed.strip_prefix("//") {
            line_run.push(rest.strip_prefix(' ').unwrap_or(rest).to_string());
            continue;
        }

        if !line_run.is_empty() {
            comments.push(normalize(std::mem::take(&mut line_run)));
        }

        if let Some(rest) = trimmed.strip_prefix("/*") {
            if let Some(end) = rest.find("*/") {
                let text = rest[..end].trim_start_matches('*').trim();
                if !text.is_empty() {
                    comments.push(text.to_string());
                }
            } else {
                let text = rest.trim_start_matches('*').trim();
                let mut lines = Vec::new();
                if !text.is_empty() {
                    lines.push(text.to_string());
                }
                block = Some(lines);
            }
        }
    }

    if !line_run.is_empty() {
        comments.push(normalize(line_run));
    }
    // An unterminated block still counts
    if let Some(lines) = block {
        comments.push(normalize(lines));
    }

    comments
}

/// Remove a leading ` * ` gutter from a block comment line
fn strip_gutter(line: &str) -> String {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix('*') {
        Some(rest) if !rest.starts_with('/') => rest.strip_prefix(' ').unwrap_or(rest).to_string(),
        _ => line.to_string(),
    }
}

/// Drop common indentation and trailing whitespace
fn normalize(lines: Vec<String>) -> String {
    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    // Indent is counted in chars, not bytes
    lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                String::new()
            } else {
                l.chars().skip(indent).collect::<String>().trim_end().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim_matches('\n')
        .to_string()
}
