//! Block-level render nodes
//!
//! A render node is one presentational block produced from a section body.
//! Nodes are derived on every render pass and never stored in the catalog.

use super::inline::{tokenize, InlineSpan};

/// Block-level element of a rendered section body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    /// A line of running text
    Paragraph(String),

    /// A `###` heading, with the marker stripped
    Heading(String),

    /// A `- [ ]` / `- [x]` checklist entry
    ChecklistItem {
        /// Item text following the bracket
        text: String,
        /// Whether the bracket held `x` or `X`
        checked: bool,
    },

    /// A `-` bullet entry
    BulletItem(String),

    /// A fenced code block
    CodeBlock {
        /// Language tag from the opening fence, or the default language
        language: String,
        /// Raw code text, without the tag line
        code: String,
    },

    /// A fenced `mermaid` block, handed to the diagram backend as-is
    DiagramBlock(String),

    /// Blank line placeholder
    Spacer,
}

impl RenderNode {
    /// Text that is displayed through the inline tokenizer
    ///
    /// # Returns
    /// * `Some(&str)` - For paragraphs, headings, checklist and bullet items
    /// * `None` - For code, diagram and spacer nodes, which are shown verbatim or not at all
    pub fn inline_text(&self) -> Option<&str> {
        match self {
            RenderNode::Paragraph(text)
            | RenderNode::Heading(text)
            | RenderNode::BulletItem(text)
            | RenderNode::ChecklistItem { text, .. } => Some(text),
            RenderNode::CodeBlock { .. } | RenderNode::DiagramBlock(_) | RenderNode::Spacer => None,
        }
    }

    /// Tokenize the node's display text into inline spans
    ///
    /// Nodes without inline text yield an empty vector.
    pub fn spans(&self) -> Vec<InlineSpan> {
        self.inline_text().map(tokenize).unwrap_or_default()
    }

    /// Plain words contained in the node, used for word counts
    pub fn word_count(&self) -> usize {
        match self {
            RenderNode::CodeBlock { code, .. } => code.split_whitespace().count(),
            RenderNode::DiagramBlock(_) | RenderNode::Spacer => 0,
            other => other
                .spans()
                .iter()
                .map(|span| span.text().split_whitespace().count())
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_text_for_text_nodes() {
        let node = RenderNode::ChecklistItem {
            text: "Enable **CSRF**".to_string(),
            checked: true,
        };
        assert_eq!(node.inline_text(), Some("Enable **CSRF**"));
        assert_eq!(
            node.spans(),
            vec![
                InlineSpan::PlainText("Enable ".to_string()),
                InlineSpan::Bold("CSRF".to_string()),
            ]
        );
    }

    #[test]
    fn test_code_and_diagram_nodes_have_no_spans() {
        let code = RenderNode::CodeBlock {
            language: "java".to_string(),
            code: "**not bold**".to_string(),
        };
        assert!(code.spans().is_empty());
        assert!(RenderNode::DiagramBlock("graph TD".to_string())
            .spans()
            .is_empty());
        assert!(RenderNode::Spacer.spans().is_empty());
    }

    #[test]
    fn test_word_count() {
        assert_eq!(
            RenderNode::Paragraph("Use [JWT](https://jwt.io) tokens".to_string()).word_count(),
            3
        );
        assert_eq!(RenderNode::Spacer.word_count(), 0);
        assert_eq!(
            RenderNode::DiagramBlock("graph TD\nA-->B".to_string()).word_count(),
            0
        );
    }
}
