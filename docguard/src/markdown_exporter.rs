//! Markdown exporter for rendered sites
//!
//! This module exports a RenderedSite to a single markdown file with:
//! - The site title as H1, sections as H2 and subsections as H3
//! - Content headings demoted to H4
//! - Code and diagram blocks as fenced blocks

use crate::markup::{RenderNode, DIAGRAM_LANGUAGE, FENCE};
use crate::rendered_site::{RenderedSection, RenderedSite};
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during markdown export
#[derive(Error, Debug)]
pub enum MarkdownExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Export a rendered site to markdown format
///
/// # Parameters
/// * `site` - The rendered site to export
/// * `output_path` - Path where the markdown file will be written
///
/// # Returns
/// * `Ok(())` - Successfully exported to markdown
/// * `Err(MarkdownExportError)` - Error during export
pub fn to_markdown(site: &RenderedSite, output_path: &Path) -> Result<(), MarkdownExportError> {
    let output = render_markdown(site);

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(output_path)?;
    file.write_all(output.as_bytes())?;

    log::info!("Wrote {}", output_path.display());

    Ok(())
}

/// Render the whole site as one markdown document
pub fn render_markdown(site: &RenderedSite) -> String {
    let mut output = String::new();

    // Write site title as H1 if available
    if !site.metadata.title.is_empty() {
        output.push_str(&format!("# {}\n\n", site.metadata.title));
    }
    if !site.metadata.tagline.is_empty() {
        output.push_str(&format!("_{}_\n\n", site.metadata.tagline));
    }

    if site.sections.is_empty() {
        output.push_str("No modules found\n");
    }

    for section in &site.sections {
        write_section(&mut output, section);
    }

    output
}

/// Write a single section and its subsections to the output
fn write_section(output: &mut String, section: &RenderedSection) {
    output.push_str(&format!("## {}\n\n", section.title));
    write_nodes(output, &section.nodes);

    for sub in &section.sub_sections {
        output.push_str(&format!("### {}\n\n", sub.title));
        write_nodes(output, &sub.nodes);
    }
}

/// Write a body, making sure it ends with a blank line
fn write_nodes(output: &mut String, nodes: &[RenderNode]) {
    for node in nodes {
        write_node(output, node);
    }
    if !output.ends_with("\n\n") {
        output.push('\n');
    }
}

/// Write a single render node to the output
///
/// Inline markup is kept as written, since it is already markdown.
fn write_node(output: &mut String, node: &RenderNode) {
    match node {
        RenderNode::Paragraph(text) => {
            output.push_str(text);
            output.push('\n');
        }
        RenderNode::Heading(text) => {
            output.push_str(&format!("#### {}\n", text));
        }
        RenderNode::ChecklistItem { text, checked } => {
            let mark = if *checked { 'x' } else { ' ' };
            output.push_str(&format!("- [{}] {}\n", mark, text));
        }
        RenderNode::BulletItem(text) => {
            output.push_str(&format!("- {}\n", text));
        }
        RenderNode::CodeBlock { language, code } => {
            write_fenced(output, language, code);
        }
        RenderNode::DiagramBlock(text) => {
            write_fenced(output, DIAGRAM_LANGUAGE, text.trim());
        }
        RenderNode::Spacer => {
            output.push('\n');
        }
    }
}

fn write_fenced(output: &mut String, language: &str, body: &str) {
    output.push_str(&format!("{}{}\n", FENCE, language));
    for line in body.lines() {
        output.push_str(line);
        output.push('\n');
    }
    output.push_str(&format!("{}\n", FENCE));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::site_config::SiteConfig;

    fn site(toml: &str) -> RenderedSite {
        let catalog = Catalog::from_toml_str(toml).unwrap();
        RenderedSite::build(&catalog, &SiteConfig::default(), None)
    }

    #[test]
    fn test_section_headings() {
        let site = site(
            "[[sections]]\nid = \"a\"\ntitle = \"1. Intro\"\ncontent = \"Hello **world**\"\n\n[[sections.subSections]]\nid = \"b\"\ntitle = \"Details\"\ncontent = \"- item\"\n",
        );
        let markdown = render_markdown(&site);

        assert!(markdown.starts_with("# Spring Guard\n\n"));
        assert!(markdown.contains("## 1. Intro\n\nHello **world**\n\n"));
        assert!(markdown.contains("### Details\n\n- item\n\n"));
    }

    #[test]
    fn test_blocks_are_reemitted() {
        let mut output = String::new();
        write_node(&mut output, &RenderNode::Heading("Overview".to_string()));
        write_node(
            &mut output,
            &RenderNode::ChecklistItem {
                text: "Enable CSRF".to_string(),
                checked: true,
            },
        );
        write_node(
            &mut output,
            &RenderNode::ChecklistItem {
                text: "Rotate keys".to_string(),
                checked: false,
            },
        );
        write_node(
            &mut output,
            &RenderNode::CodeBlock {
                language: "yaml".to_string(),
                code: "server:\n  port: 8443".to_string(),
            },
        );
        write_node(
            &mut output,
            &RenderNode::DiagramBlock("\ngraph TD\nA-->B\n".to_string()),
        );

        assert_eq!(
            output,
            "#### Overview\n- [x] Enable CSRF\n- [ ] Rotate keys\n```yaml\nserver:\n  port: 8443\n```\n```mermaid\ngraph TD\nA-->B\n```\n"
        );
    }

    #[test]
    fn test_empty_site() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        let site = RenderedSite::build(&catalog, &SiteConfig::default(), None);
        assert!(render_markdown(&site).contains("No modules found"));
    }

    #[test]
    fn test_to_markdown_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested/out.md");
        let site = site("[[sections]]\nid = \"a\"\ntitle = \"A\"\ncontent = \"Body\"\n");

        to_markdown(&site, &output).unwrap();
        assert!(fs::read_to_string(&output).unwrap().contains("## A"));
    }
}
