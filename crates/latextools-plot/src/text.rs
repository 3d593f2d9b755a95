//! String helpers for generated LaTeX.

/// Indentation added for each nesting level of generated code.
pub const INDENT_STEP: &str = "    ";

/// Reduce a label to a file- and column-safe name.
///
/// Spaces become `-`, letters are lowercased and anything outside
/// `[a-z0-9-]` is dropped.
pub fn clean_string(s: &str) -> String {
    s.replace(' ', "-")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

/// Escape characters that LaTeX treats specially in labels.
pub fn escape_latex(s: &str) -> String {
    s.replace('_', "\\_")
}

/// Prefix every non-empty line of `text` with `indent`.
pub fn prefix_lines(indent: &str, text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_string() {
        assert_eq!(clean_string("Run Time (s)"), "run-time-s");
        assert_eq!(clean_string("Größe_2"), "gre2");
        assert_eq!(clean_string(""), "");
    }

    #[test]
    fn test_escape_latex() {
        assert_eq!(escape_latex("max_iter"), "max\\_iter");
    }

    #[test]
    fn test_prefix_lines_skips_blank_lines() {
        assert_eq!(prefix_lines("  ", "a\n\nb"), "  a\n\n  b");
    }
}
