//! Rendered site model for the export stage
//!
//! This module defines the structures produced after every catalog body has
//! been rendered into block nodes, ready for the HTML, markdown, and text
//! exporters. A rendered site is built per export and dropped afterwards.

use crate::catalog::{Catalog, DocSection, SubSection};
use crate::markup::{render, RenderNode};
use crate::site_config::{SiteConfig, Theme};

/// The rendered site ready for export
#[derive(Debug)]
pub struct RenderedSite {
    /// Site metadata
    pub metadata: SiteMetadata,
    /// Sections that were selected for export, in catalog order
    pub sections: Vec<RenderedSection>,
    /// Id of the section highlighted when the page opens
    pub active_section_id: Option<String>,
    /// Search query the sections were filtered with, if any
    pub query: Option<String>,
}

/// Site metadata
#[derive(Debug, Clone)]
pub struct SiteMetadata {
    /// Site title
    pub title: String,
    /// Short line under the title
    pub tagline: String,
    /// Colour theme
    pub theme: Theme,
}

/// A top-level section with its rendered body and subsections
#[derive(Debug, Clone)]
pub struct RenderedSection {
    /// Anchor id
    pub id: String,
    /// Display title
    pub title: String,
    /// Rendered body
    pub nodes: Vec<RenderNode>,
    /// Rendered subsections
    pub sub_sections: Vec<RenderedSubSection>,
}

/// A subsection with its rendered body
#[derive(Debug, Clone)]
pub struct RenderedSubSection {
    /// Anchor id
    pub id: String,
    /// Display title
    pub title: String,
    /// Rendered body
    pub nodes: Vec<RenderNode>,
}

impl RenderedSite {
    /// Render the catalog, optionally keeping only sections that match `query`
    ///
    /// The active section is `config.start_section` when it exists in the
    /// catalog, otherwise the first exported section.
    pub fn build(catalog: &Catalog, config: &SiteConfig, query: Option<&str>) -> Self {
        let query = query.filter(|q| !q.trim().is_empty());

        let sections: Vec<RenderedSection> = match query {
            Some(q) => catalog.filter(q).into_iter().map(RenderedSection::from).collect(),
            None => catalog.sections().iter().map(RenderedSection::from).collect(),
        };

        let active_section_id = match catalog.find_by_id(&config.start_section) {
            Some(entry) if sections.iter().any(|s| s.id == entry.section().id) => {
                Some(entry.id().to_string())
            }
            _ => {
                if !config.start_section.is_empty() && query.is_none() {
                    log::warn!(
                        "Start section '{}' not found, falling back to the first section",
                        config.start_section
                    );
                }
                sections.first().map(|s| s.id.clone())
            }
        };

        Self {
            metadata: SiteMetadata {
                title: config.site_title.clone(),
                tagline: config.tagline.clone(),
                theme: config.theme,
            },
            sections,
            active_section_id,
            query: query.map(str::to_string),
        }
    }

    /// Id of the top-level section that contains the active entry
    pub fn active_parent_id(&self) -> Option<&str> {
        let active = self.active_section_id.as_deref()?;
        self.sections
            .iter()
            .find(|s| s.id == active || s.sub_sections.iter().any(|sub| sub.id == active))
            .map(|s| s.id.as_str())
    }

    /// Get the total word count across all sections
    pub fn word_count(&self) -> usize {
        self.all_nodes().map(RenderNode::word_count).sum()
    }

    /// Get the total number of code blocks
    pub fn code_block_count(&self) -> usize {
        self.all_nodes()
            .filter(|n| matches!(n, RenderNode::CodeBlock { .. }))
            .count()
    }

    /// Get the total number of diagrams
    pub fn diagram_count(&self) -> usize {
        self.all_nodes()
            .filter(|n| matches!(n, RenderNode::DiagramBlock(_)))
            .count()
    }

    /// Whether any exported section contains a diagram
    pub fn has_diagrams(&self) -> bool {
        self.diagram_count() > 0
    }

    fn all_nodes(&self) -> impl Iterator<Item = &RenderNode> {
        self.sections.iter().flat_map(|section| {
            section
                .nodes
                .iter()
                .chain(section.sub_sections.iter().flat_map(|sub| sub.nodes.iter()))
        })
    }
}

impl From<&DocSection> for RenderedSection {
    fn from(section: &DocSection) -> Self {
        Self {
            id: section.id.clone(),
            title: section.title.clone(),
            nodes: render(&section.content),
            sub_sections: section
                .sub_sections
                .iter()
                .map(RenderedSubSection::from)
                .collect(),
        }
    }
}

impl From<&SubSection> for RenderedSubSection {
    fn from(sub: &SubSection) -> Self {
        Self {
            id: sub.id.clone(),
            title: sub.title.clone(),
            nodes: render(&sub.content),
        }
    }
}
