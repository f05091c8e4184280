//! Inline span tokenizer
//!
//! Splits a single line into plain text, bold, inline code and link spans.
//! The three delimiters are tried as one alternation in a single left-to-right
//! scan, so the earliest match wins and spans never nest.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// A span of inline text with one kind of formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    /// Unformatted text, emitted verbatim
    PlainText(String),

    /// Text between `**` delimiters
    Bold(String),

    /// Text between single backticks
    InlineCode(String),

    /// A `[label](url)` hyperlink
    Link {
        /// Visible link text
        label: String,
        /// Link target
        url: String,
    },
}

impl InlineSpan {
    /// The visible text of the span (the label, for links)
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::PlainText(text) | InlineSpan::Bold(text) | InlineSpan::InlineCode(text) => {
                text
            }
            InlineSpan::Link { label, .. } => label,
        }
    }
}

/// Bold, inline code and link alternatives, in priority order.
///
/// Each alternative captures into its own groups: 1 = bold, 2 = code,
/// 3 and 4 = link label and url. The lazy quantifiers stop at the first
/// closing delimiter.
static INLINE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn inline_pattern() -> &'static Regex {
    INLINE_PATTERN.get_or_init(|| {
        Regex::new(r"\*\*(.*?)\*\*|`(.*?)`|\[(.*?)\]\((.*?)\)")
            .expect("inline span pattern is a valid regex")
    })
}

/// Tokenize one line of markup into inline spans
///
/// Text outside the recognised delimiters becomes [`InlineSpan::PlainText`].
/// Unmatched delimiters (a lone `**`, an unclosed backtick, a bracket with
/// no `(url)`) stay in the plain text. Empty plain segments are dropped.
///
/// # Parameters
/// * `line` - The text of a single paragraph, heading or list item
///
/// # Returns
/// * `Vec<InlineSpan>` - Spans in source order; empty for an empty line
pub fn tokenize(line: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in inline_pattern().captures_iter(line) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        push_plain(&mut spans, &line[cursor..whole.start()]);
        spans.push(span_from_captures(&caps));
        cursor = whole.end();
    }

    push_plain(&mut spans, &line[cursor..]);
    spans
}

/// Build the formatted span for whichever alternative matched
fn span_from_captures(caps: &Captures<'_>) -> InlineSpan {
    let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string());

    if let Some(inner) = group(1) {
        InlineSpan::Bold(inner)
    } else if let Some(inner) = group(2) {
        InlineSpan::InlineCode(inner)
    } else {
        InlineSpan::Link {
            label: group(3).unwrap_or_default(),
            url: group(4).unwrap_or_default(),
        }
    }
}

fn push_plain(spans: &mut Vec<InlineSpan>, text: &str) {
    if !text.is_empty() {
        spans.push(InlineSpan::PlainText(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> InlineSpan {
        InlineSpan::PlainText(text.to_string())
    }

    #[test]
    fn test_mixed_spans_in_order() {
        let spans = tokenize("Use **bold** and `code` and [link](http://x)");
        assert_eq!(
            spans,
            vec![
                plain("Use "),
                InlineSpan::Bold("bold".to_string()),
                plain(" and "),
                InlineSpan::InlineCode("code".to_string()),
                plain(" and "),
                InlineSpan::Link {
                    label: "link".to_string(),
                    url: "http://x".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_plain_line() {
        assert_eq!(tokenize("No markup here"), vec![plain("No markup here")]);
    }

    #[test]
    fn test_empty_line() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_span_at_line_start_has_no_leading_plain() {
        let spans = tokenize("**Authentication**: Verify user identity");
        assert_eq!(
            spans,
            vec![
                InlineSpan::Bold("Authentication".to_string()),
                plain(": Verify user identity"),
            ]
        );
    }

    #[test]
    fn test_unmatched_delimiters_stay_plain() {
        assert_eq!(tokenize("a ** b"), vec![plain("a ** b")]);
        assert_eq!(tokenize("open `tick"), vec![plain("open `tick")]);
        assert_eq!(tokenize("[label] only"), vec![plain("[label] only")]);
    }

    #[test]
    fn test_first_match_wins_for_overlapping_markers() {
        // The code span starts first, so the bold markers inside it are literal.
        assert_eq!(
            tokenize("`**not bold**`"),
            vec![InlineSpan::InlineCode("**not bold**".to_string())]
        );
    }

    #[test]
    fn test_bold_stops_at_next_delimiter() {
        assert_eq!(
            tokenize("**a** b **c**"),
            vec![
                InlineSpan::Bold("a".to_string()),
                plain(" b "),
                InlineSpan::Bold("c".to_string()),
            ]
        );
    }

    #[test]
    fn test_link_text() {
        let spans = tokenize("See [Spring Docs](https://docs.spring.io/spring-security/reference/)");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].text(), "Spring Docs");
    }
}
