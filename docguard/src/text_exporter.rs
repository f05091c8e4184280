//! Plain text exporter
//!
//! Used by the `show` command to print an entry in the terminal, and by
//! `build` for `.txt` output. Inline markup is flattened and links are
//! written as `label (url)`.

use crate::markup::{InlineSpan, RenderNode};
use crate::rendered_site::RenderedSite;
use std::fs;
use std::path::Path;

const CODE_INDENT: &str = "    ";

/// Write the whole site as plain text
pub fn to_text_file(site: &RenderedSite, output_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_path, render_text(site))?;
    log::info!("Wrote {}", output_path.display());
    Ok(())
}

/// Render the whole site as plain text
pub fn render_text(site: &RenderedSite) -> String {
    let mut output = String::new();
    push_underlined(&mut output, &site.metadata.title, '=');

    if site.sections.is_empty() {
        output.push_str("No modules found\n");
    }

    for section in &site.sections {
        output.push_str(&render_entry(&section.title, &section.nodes));
        for sub in &section.sub_sections {
            output.push_str(&render_entry(&sub.title, &sub.nodes));
        }
    }
    output
}

/// Render a single titled entry
pub fn render_entry(title: &str, nodes: &[RenderNode]) -> String {
    let mut output = String::new();
    push_underlined(&mut output, title, '-');
    for node in nodes {
        write_node(&mut output, node);
    }
    output.push('\n');
    output
}

fn push_underlined(output: &mut String, text: &str, underline: char) {
    output.push_str(text);
    output.push('\n');
    output.push_str(&underline.to_string().repeat(text.chars().count()));
    output.push_str("\n\n");
}

fn write_node(output: &mut String, node: &RenderNode) {
    match node {
        RenderNode::Paragraph(_) => {
            output.push_str(&flatten(&node.spans()));
            output.push('\n');
        }
        RenderNode::Heading(_) => {
            output.push('\n');
            output.push_str(&flatten(&node.spans()).to_uppercase());
            output.push('\n');
        }
        RenderNode::ChecklistItem { checked, .. } => {
            let mark = if *checked { "[x]" } else { "[ ]" };
            output.push_str(&format!("  {} {}\n", mark, flatten(&node.spans())));
        }
        RenderNode::BulletItem(_) => {
            output.push_str(&format!("  * {}\n", flatten(&node.spans())));
        }
        RenderNode::CodeBlock { language, code } => {
            output.push_str(&format!("  [{}]\n", language));
            push_indented(output, code);
        }
        RenderNode::DiagramBlock(text) => {
            output.push_str("  [diagram]\n");
            push_indented(output, text.trim());
        }
        RenderNode::Spacer => output.push('\n'),
    }
}

fn push_indented(output: &mut String, text: &str) {
    for line in text.lines() {
        output.push_str(CODE_INDENT);
        output.push_str(line);
        output.push('\n');
    }
}

/// Join spans into plain text
fn flatten(spans: &[InlineSpan]) -> String {
    spans
        .iter()
        .map(|span| match span {
            InlineSpan::Link { label, url } => format!("{} ({})", label, url),
            other => other.text().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::render;

    #[test]
    fn test_flatten_links_and_markup() {
        let spans = vec![
            InlineSpan::PlainText("See ".to_string()),
            InlineSpan::Bold("docs".to_string()),
            InlineSpan::PlainText(": ".to_string()),
            InlineSpan::Link {
                label: "guide".to_string(),
                url: "https://spring.io".to_string(),
            },
        ];
        assert_eq!(flatten(&spans), "See docs: guide (https://spring.io)");
    }

    #[test]
    fn test_render_entry() {
        let nodes = render("### Steps\n- [x] Add `spring-boot-starter-security`\n- Roles\n```bash\nmvn test\n```");
        let text = render_entry("Setup", &nodes);

        assert_eq!(
            text,
            "Setup\n-----\n\n\nSTEPS\n  [x] Add spring-boot-starter-security\n  * Roles\n\n  [bash]\n    mvn test\n\n"
        );
    }

    #[test]
    fn test_diagram_is_indented() {
        let mut output = String::new();
        write_node(
            &mut output,
            &RenderNode::DiagramBlock("\ngraph TD\nA-->B\n".to_string()),
        );
        assert_eq!(output, "  [diagram]\n    graph TD\n    A-->B\n");
    }
}
