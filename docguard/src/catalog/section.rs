//! Catalog entry types

use serde::{Deserialize, Serialize};

/// One top-level documentation topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocSection {
    /// Stable anchor identifier, unique across the catalog
    pub id: String,

    /// Display title
    pub title: String,

    /// Body text in the markup dialect
    pub content: String,

    /// Nested topics, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_sections: Vec<SubSection>,
}

/// A topic nested one level under a [`DocSection`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSection {
    /// Stable anchor identifier, unique across the catalog
    pub id: String,

    /// Display title
    pub title: String,

    /// Body text in the markup dialect
    pub content: String,
}

impl DocSection {
    /// Whether the section's own title or body contains the lowercased query
    pub(crate) fn matches_own_text(&self, needle: &str) -> bool {
        contains_folded(&self.title, needle) || contains_folded(&self.content, needle)
    }

    /// Subsections whose title or body contains the lowercased query
    pub(crate) fn matching_sub_sections(&self, needle: &str) -> Vec<&SubSection> {
        self.sub_sections
            .iter()
            .filter(|sub| sub.matches_text(needle))
            .collect()
    }

    /// Whether the section or any of its subsections contains the lowercased query
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.matches_own_text(needle)
            || self.sub_sections.iter().any(|sub| sub.matches_text(needle))
    }

    /// Ids of this section followed by its subsections
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str()).chain(self.sub_sections.iter().map(|s| s.id.as_str()))
    }
}

impl SubSection {
    pub(crate) fn matches_text(&self, needle: &str) -> bool {
        contains_folded(&self.title, needle) || contains_folded(&self.content, needle)
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
