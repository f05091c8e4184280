//! Documentation catalog
//!
//! The catalog is the fixed corpus of documentation sections rendered by the
//! site exporter and searched by the CLI. It is built once, validated for id
//! uniqueness, and never mutated afterwards; consumers borrow it.
//!
//! A built-in corpus is compiled into the binary. An external catalog with
//! the same shape can be loaded from a `.toml` file (an array of
//! `[[sections]]` tables) or a `.json` file (a top-level array of sections).

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

mod error;
mod section;

pub use error::CatalogError;
pub use section::{DocSection, SubSection};

/// TOML source of the built-in corpus
pub const BUILTIN_CATALOG: &str = include_str!("catalog/builtin.toml");

/// On-disk TOML layout: a single `sections` array
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    sections: Vec<DocSection>,
}

/// Immutable, validated collection of documentation sections
#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<DocSection>,
}

/// Result of an id lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEntry<'a> {
    /// A top-level section
    Section(&'a DocSection),

    /// A subsection together with the section that contains it
    SubSection {
        /// Containing section
        parent: &'a DocSection,
        /// The matched subsection
        sub: &'a SubSection,
    },
}

impl<'a> CatalogEntry<'a> {
    /// Id of the matched entry
    pub fn id(&self) -> &'a str {
        match self {
            CatalogEntry::Section(section) => &section.id,
            CatalogEntry::SubSection { sub, .. } => &sub.id,
        }
    }

    /// Title of the matched entry
    pub fn title(&self) -> &'a str {
        match self {
            CatalogEntry::Section(section) => &section.title,
            CatalogEntry::SubSection { sub, .. } => &sub.title,
        }
    }

    /// Body of the matched entry
    pub fn content(&self) -> &'a str {
        match self {
            CatalogEntry::Section(section) => &section.content,
            CatalogEntry::SubSection { sub, .. } => &sub.content,
        }
    }

    /// The top-level section that owns this entry
    pub fn section(&self) -> &'a DocSection {
        match self {
            CatalogEntry::Section(section) => section,
            CatalogEntry::SubSection { parent, .. } => parent,
        }
    }
}

/// A section returned by [`Catalog::search`], with the subsections that
/// matched on their own text
#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    /// The matching section, always returned whole
    pub section: &'a DocSection,

    /// Whether the section's own title or body matched
    pub own_match: bool,

    /// Subsections whose title or body matched
    pub matched_sub_sections: Vec<&'a SubSection>,
}

impl Catalog {
    /// Build a catalog from sections, checking that ids are unique and non-empty
    ///
    /// # Parameters
    /// * `sections` - Sections in display order
    ///
    /// # Returns
    /// * `Ok(Catalog)` - All ids are non-empty and unique across sections and subsections
    /// * `Err(CatalogError)` - An empty or duplicate id was found
    pub fn new(sections: Vec<DocSection>) -> Result<Self, CatalogError> {
        if let Some(title) = Self::entry_with_empty_id(&sections) {
            return Err(CatalogError::EmptyId { title });
        }

        if let Some(id) = sections
            .iter()
            .flat_map(DocSection::ids)
            .duplicates()
            .next()
        {
            return Err(CatalogError::DuplicateId { id: id.to_string() });
        }

        Ok(Self { sections })
    }

    /// Parse and validate the built-in corpus
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::new(file.sections)
    }

    /// Parse a catalog from JSON text (a top-level array of sections)
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let sections: Vec<DocSection> = serde_json::from_str(text)?;
        Self::new(sections)
    }

    /// Load a catalog file, choosing the format from its extension
    ///
    /// # Parameters
    /// * `path` - Path to a `.toml` or `.json` catalog
    ///
    /// # Returns
    /// * `Ok(Catalog)` - Successfully loaded and validated catalog
    /// * `Err(CatalogError)` - Error reading, parsing, or validating the file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CatalogError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => {
                return Err(CatalogError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        log::info!(
            "Loaded catalog {} ({} sections, {} entries)",
            path.display(),
            catalog.len(),
            catalog.entry_count()
        );
        Ok(catalog)
    }

    /// Load from `path` when given, otherwise use the built-in corpus
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Serialize the catalog as TOML in the on-disk layout
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&CatalogFile {
            sections: self.sections.clone(),
        })
    }

    /// All sections in display order
    pub fn sections(&self) -> &[DocSection] {
        &self.sections
    }

    /// The first section, used as the fallback when a lookup fails
    pub fn first(&self) -> Option<&DocSection> {
        self.sections.first()
    }

    /// Number of top-level sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the catalog has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of sections plus subsections
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| 1 + s.sub_sections.len()).sum()
    }

    /// Find a section or subsection by id
    ///
    /// Top-level sections are searched first, then each section's subsections
    /// in order.
    ///
    /// # Returns
    /// * `Some(CatalogEntry)` - The matching entry
    /// * `None` - No entry has this id
    pub fn find_by_id(&self, id: &str) -> Option<CatalogEntry<'_>> {
        if let Some(section) = self.sections.iter().find(|s| s.id == id) {
            return Some(CatalogEntry::Section(section));
        }

        self.sections.iter().find_map(|parent| {
            parent
                .sub_sections
                .iter()
                .find(|sub| sub.id == id)
                .map(|sub| CatalogEntry::SubSection { parent, sub })
        })
    }

    /// Sections whose title, body, or any subsection's title or body contains
    /// `query`, ignoring case
    ///
    /// A section is kept whole when any part of it matches, including
    /// subsections that did not match. Order is preserved. The query is
    /// matched as given, surrounding whitespace included; a blank query
    /// returns every section.
    pub fn filter(&self, query: &str) -> Vec<&DocSection> {
        self.search(query).into_iter().map(|hit| hit.section).collect()
    }

    /// Like [`Catalog::filter`], but reports which parts of each section matched
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        if query.trim().is_empty() {
            return self
                .sections
                .iter()
                .map(|section| SearchHit {
                    section,
                    own_match: true,
                    matched_sub_sections: Vec::new(),
                })
                .collect();
        }

        let needle = query.to_lowercase();
        self.sections
            .iter()
            .filter(|section| section.matches(&needle))
            .map(|section| SearchHit {
                section,
                own_match: section.matches_own_text(&needle),
                matched_sub_sections: section.matching_sub_sections(&needle),
            })
            .collect()
    }

    fn entry_with_empty_id(sections: &[DocSection]) -> Option<String> {
        sections.iter().find_map(|section| {
            if section.id.trim().is_empty() {
                return Some(section.title.clone());
            }
            section
                .sub_sections
                .iter()
                .find(|sub| sub.id.trim().is_empty())
                .map(|sub| sub.title.clone())
        })
    }
}
