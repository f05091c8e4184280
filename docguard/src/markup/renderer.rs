//! Block splitter for section bodies
//!
//! Converts a body string into an ordered list of [`RenderNode`]s. The body
//! is first cut on fence delimiters; even-indexed segments are prose and are
//! classified line by line, odd-indexed segments are fenced blocks.

use super::nodes::RenderNode;
use regex::Regex;
use std::sync::OnceLock;

/// Fence delimiter that opens and closes code blocks
pub const FENCE: &str = "```";

/// Fence tag that marks a diagram description
pub const DIAGRAM_LANGUAGE: &str = "mermaid";

/// Language assumed for fences with an empty tag line
pub const DEFAULT_CODE_LANGUAGE: &str = "java";

/// Heading marker at the start of a prose line
const HEADING_MARKER: &str = "###";

/// `-`, optional whitespace, a one-character bracket, optional whitespace
static CHECKLIST_PATTERN: OnceLock<Regex> = OnceLock::new();

fn checklist_pattern() -> &'static Regex {
    CHECKLIST_PATTERN.get_or_init(|| {
        Regex::new(r"^-\s*\[([ xX])\]\s*").expect("checklist pattern is a valid regex")
    })
}

/// Render a section body into block-level nodes
///
/// Never fails. An unterminated fence leaves its trailing segment to be
/// treated as a fenced block, empty segments produce nothing, and a fenced
/// segment with neither tag nor code is dropped.
///
/// # Parameters
/// * `content` - Body text in the catalog markup dialect
///
/// # Returns
/// * `Vec<RenderNode>` - Nodes in document order; empty for empty content
pub fn render(content: &str) -> Vec<RenderNode> {
    let mut nodes = Vec::new();

    for (index, segment) in content.split(FENCE).enumerate() {
        if segment.is_empty() {
            continue;
        }

        if index % 2 == 0 {
            nodes.extend(
                segment
                    .split('\n')
                    .map(|line| line.strip_suffix('\r').unwrap_or(line))
                    .map(classify_line),
            );
        } else if let Some(node) = render_fenced(segment) {
            nodes.push(node);
        }
    }

    nodes
}

/// Number of fence delimiters in a body
///
/// An odd count means the last fenced block was never closed.
pub fn fence_count(content: &str) -> usize {
    content.matches(FENCE).count()
}

/// Fenced blocks of a body as `(tag, code)` pairs, in document order
///
/// The tag is trimmed and the code loses its trailing newlines. The
/// trailing segment of an unterminated fence is included. Segments that
/// are completely empty, such as the inside of a lone fence, are skipped.
pub fn fenced_blocks(content: &str) -> impl Iterator<Item = (&str, &str)> {
    content
        .split(FENCE)
        .skip(1)
        .step_by(2)
        .filter(|segment| !segment.is_empty())
        .map(split_fenced)
}

/// Classify a single prose line
fn classify_line(line: &str) -> RenderNode {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return RenderNode::Spacer;
    }

    if let Some(rest) = trimmed.strip_prefix(HEADING_MARKER) {
        return RenderNode::Heading(rest.trim_start().to_string());
    }

    if let Some(caps) = checklist_pattern().captures(trimmed) {
        let checked = caps
            .get(1)
            .is_some_and(|m| m.as_str().eq_ignore_ascii_case("x"));
        let text_start = caps.get(0).map_or(0, |m| m.end());
        return RenderNode::ChecklistItem {
            text: trimmed[text_start..].to_string(),
            checked,
        };
    }

    if let Some(rest) = trimmed.strip_prefix('-') {
        return RenderNode::BulletItem(rest.trim().to_string());
    }

    RenderNode::Paragraph(line.to_string())
}

fn split_fenced(segment: &str) -> (&str, &str) {
    let (tag_line, body) = segment.split_once('\n').unwrap_or((segment, ""));
    (tag_line.trim(), body.trim_end_matches(['\n', '\r']))
}

/// Render the inside of a fence: tag line, then code
fn render_fenced(segment: &str) -> Option<RenderNode> {
    let (tag, code) = split_fenced(segment);

    if tag == DIAGRAM_LANGUAGE {
        if code.trim().is_empty() {
            return None;
        }
        return Some(RenderNode::DiagramBlock(code.to_string()));
    }

    if tag.is_empty() && code.trim().is_empty() {
        return None;
    }

    let language = if tag.is_empty() {
        DEFAULT_CODE_LANGUAGE
    } else {
        tag
    };

    Some(RenderNode::CodeBlock {
        language: language.to_string(),
        code: code.to_string(),
    })
}
