//! Line ending detection and normalization.
//!
//! Documents are edited with LF-only text. Files loaded from disk may use CRLF
//! or bare CR; the dominant style is remembered on the document and restored
//! when it is written back.

/// Line ending style detected from source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
    Cr,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }

    /// Expand LF-only `text` into this style.
    pub fn apply(self, text: &str) -> String {
        match self {
            LineEnding::Lf => text.to_string(),
            other => text.replace('\n', other.as_str()),
        }
    }
}

/// Result of normalizing loaded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    /// LF-only content.
    pub text: String,
    /// Majority style of the input.
    pub line_ending: LineEnding,
    /// More than one style was present.
    pub mixed: bool,
}

/// Convert CRLF and lone CR to LF, reporting which style dominated.
/// Ties prefer CRLF, then LF, then CR; text without any line break reports LF.
pub fn normalize_line_endings(input: &str) -> NormalizedText {
    let (mut lf, mut crlf, mut cr) = (0usize, 0usize, 0usize);
    let mut text = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                crlf += 1;
                text.push('\n');
            }
            '\r' => {
                cr += 1;
                text.push('\n');
            }
            '\n' => {
                lf += 1;
                text.push('\n');
            }
            other => text.push(other),
        }
    }

    let line_ending = if crlf == 0 && lf == 0 && cr == 0 {
        LineEnding::Lf
    } else if crlf >= lf && crlf >= cr {
        LineEnding::Crlf
    } else if lf >= cr {
        LineEnding::Lf
    } else {
        LineEnding::Cr
    };
    let mixed = [lf, crlf, cr].iter().filter(|n| **n > 0).count() > 1;

    NormalizedText {
        text,
        line_ending,
        mixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lf_text_passes_through() {
        let n = normalize_line_endings("a\nb\n");
        assert_eq!(n.text, "a\nb\n");
        assert_eq!(n.line_ending, LineEnding::Lf);
        assert!(!n.mixed);
    }

    #[test]
    fn crlf_is_detected_and_stripped() {
        let n = normalize_line_endings("a\r\nb\r\n");
        assert_eq!(n.text, "a\nb\n");
        assert_eq!(n.line_ending, LineEnding::Crlf);
        assert!(!n.mixed);
    }

    #[test]
    fn mixed_styles_pick_majority() {
        let n = normalize_line_endings("line1\r\nline2\nline3\r\n");
        assert_eq!(n.text, "line1\nline2\nline3\n");
        assert_eq!(n.line_ending, LineEnding::Crlf);
        assert!(n.mixed);
    }

    #[test]
    fn bare_cr_is_converted() {
        let n = normalize_line_endings("a\rb\r");
        assert_eq!(n.text, "a\nb\n");
        assert_eq!(n.line_ending, LineEnding::Cr);
    }

    #[test]
    fn no_newlines_defaults_to_lf() {
        let n = normalize_line_endings("plain");
        assert_eq!(n.line_ending, LineEnding::Lf);
        assert_eq!(n.text, "plain");
    }

    #[test]
    fn apply_restores_style() {
        assert_eq!(LineEnding::Crlf.apply("a\nb\n"), "a\r\nb\r\n");
        assert_eq!(LineEnding::Lf.apply("a\nb"), "a\nb");
        assert_eq!(LineEnding::Cr.apply("a\n"), "a\r");
    }
}
