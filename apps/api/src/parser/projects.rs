//! Projects — two-stage extraction.
//!
//! 1. The block: from the line after the first literal `Project` up to the
//!    next blank line or the next section heading (a line starting with `#`
//!    that is not a `### ` sub-heading).
//! 2. Inside the block, each `### <name>` line opens an entry whose body runs
//!    to the next `### ` line or the end of the block. Body line breaks become
//!    single spaces.

use crate::parser::record::ProjectEntry;

const SECTION_KEYWORD: &str = "Project";
const SUBHEADING: &str = "### ";

pub fn extract_projects(text: &str) -> Vec<ProjectEntry> {
    match project_block(text) {
        Some(block) => split_subheadings(block),
        None => Vec::new(),
    }
}

/// The text between the `Project` line and the block terminator, if any.
///
/// A terminator is required: a `Project` section that runs to the end of the
/// document without a blank line or a following heading yields no block.
fn project_block(text: &str) -> Option<&str> {
    let keyword_at = text.find(SECTION_KEYWORD)?;
    let start = keyword_at + text[keyword_at..].find('\n')? + 1;

    let mut cursor = start;
    // The newline that ends the keyword line can itself open the terminator.
    let mut line_break = start - 1;
    loop {
        let next = &text[line_break + 1..];
        if next.starts_with('\n') || (next.starts_with('#') && !next.starts_with(SUBHEADING)) {
            return Some(&text[start..line_break.max(start)]);
        }
        let offset = text[cursor..].find('\n')?;
        line_break = cursor + offset;
        cursor = line_break + 1;
    }
}

fn split_subheadings(block: &str) -> Vec<ProjectEntry> {
    let mut projects: Vec<(String, Vec<&str>)> = Vec::new();
    for line in block.lines() {
        if let Some(name) = line.strip_prefix(SUBHEADING) {
            projects.push((name.trim().to_string(), Vec::new()));
        } else if let Some((_, body)) = projects.last_mut() {
            body.push(line);
        }
    }

    projects
        .into_iter()
        .map(|(name, body)| ProjectEntry {
            name,
            description: body.join("\n").trim().replace('\n', " "),
        })
        .collect()
}
