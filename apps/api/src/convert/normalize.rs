/// Cleans text extracted from binary documents before parsing.
///
/// - characters outside printable ASCII and `\n` are dropped (tabs become spaces)
/// - runs of spaces collapse to one; trailing spaces are trimmed per line
/// - runs of blank lines collapse to a single line break
///
/// Line structure survives: the line-oriented extractors depend on it.
pub fn normalize_text(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for raw_line in text.lines() {
        let line = collapse_spaces(raw_line);
        if line.is_empty() {
            continue;
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn collapse_spaces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut pending_space = false;
    for c in line.chars() {
        match c {
            ' ' | '\t' | '\u{a0}' => pending_space = true,
            c if c.is_ascii_graphic() => {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(c);
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_blank_lines_and_spaces() {
        let raw = "Jane   Doe |\tNew York\n\n\n   \nSkills:  Python  \n";
        assert_eq!(normalize_text(raw), "Jane Doe | New York\nSkills: Python");
    }

    #[test]
    fn test_strips_non_printable() {
        let raw = "Caf\u{e9} \u{2022} Rust\u{0007}\r\nNext";
        assert_eq!(normalize_text(raw), "Caf Rust\nNext");
    }

    #[test]
    fn test_keeps_pipe_layout_for_extractors() {
        let raw = "  Senior Engineer  |  Acme  |  May 2020 - Present  ";
        assert_eq!(
            normalize_text(raw),
            "Senior Engineer | Acme | May 2020 - Present"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("\n\n \t\n"), "");
    }
}
