//! Markup dialect used by catalog entries
//!
//! Section bodies are written in a constrained markdown subset:
//! `###` headings, `-` bullets, `- [ ]`/`- [x]` checklist items, fenced
//! code blocks with a language tag on the opening fence, and inline
//! `**bold**`, `` `code` `` and `[label](url)` spans.
//!
//! Rendering happens in two passes. [`render`] splits a body into block
//! level [`RenderNode`]s, and [`RenderNode::spans`] splits the text of a single node
//! into [`InlineSpan`]s when it is displayed. Neither pass can fail:
//! malformed markup degrades to plain text.

mod inline;
mod nodes;
mod renderer;

pub use inline::InlineSpan;
pub use nodes::RenderNode;
pub use renderer::{fence_count, fenced_blocks, render, DIAGRAM_LANGUAGE, FENCE};
