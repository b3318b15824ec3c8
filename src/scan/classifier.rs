/// Classification of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Code,
}

/// Prefix markers that flag a line as a comment once whitespace is trimmed.
/// Covers the comment and markup openers/closers of the supported languages.
const COMMENT_MARKERS: [&str; 6] = ["//", "/*", "*", "#", "<!--", "-->"];

/// Classify one line of text.
///
/// This is a prefix-only heuristic applied identically to every language:
/// it does not track multi-line comment state, so a `*` continuation line
/// inside a Python docstring or a `#` inside a string literal still counts
/// as a comment. The rule set is fixed; counts are only comparable against
/// counts produced with the same rules.
pub fn classify(line: &str) -> LineKind {
    let stripped = line.trim();
    if stripped.is_empty() {
        return LineKind::Blank;
    }
    if COMMENT_MARKERS.iter().any(|m| stripped.starts_with(m)) {
        return LineKind::Comment;
    }
    LineKind::Code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_iff_trimmed_empty() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("   \t  "), LineKind::Blank);
        assert_ne!(classify(" x "), LineKind::Blank);
    }

    #[test]
    fn comment_markers_match_after_trimming() {
        assert_eq!(classify("// slash comment"), LineKind::Comment);
        assert_eq!(classify("  /* block open"), LineKind::Comment);
        assert_eq!(classify(" * continuation"), LineKind::Comment);
        assert_eq!(classify("# hash"), LineKind::Comment);
        assert_eq!(classify("<!-- html open"), LineKind::Comment);
        assert_eq!(classify("--> html close"), LineKind::Comment);
    }

    #[test]
    fn anything_else_is_code() {
        assert_eq!(classify("let x = 1; // trailing comment"), LineKind::Code);
        assert_eq!(classify("print(1)"), LineKind::Code);
        assert_eq!(classify("a * b"), LineKind::Code);
    }

    #[test]
    fn heuristic_is_prefix_only() {
        // A multiplication spelled with a leading `*` is misread as a
        // comment; that is the documented behavior, not a bug.
        assert_eq!(classify("*ptr = 1;"), LineKind::Comment);
    }
}
