//! Three-stage site processing pipeline
//!
//! This module orchestrates the three stages of building the documentation site:
//! 1. **Loading**: Read docguard.toml and the section catalog
//! 2. **Rendering**: Convert every section body into render nodes
//! 3. **Export**: Generate output formats (html, markdown, text)

use crate::catalog::{Catalog, CatalogError};
use crate::rendered_site::RenderedSite;
use crate::site_config::{SiteConfig, SiteConfigError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration and catalog loaded from disk
#[derive(Debug)]
pub struct Workspace {
    /// Site configuration
    pub config: SiteConfig,
    /// Section catalog
    pub catalog: Catalog,
}

/// Stage 1: Load configuration and catalog
///
/// The catalog is taken from `catalog_override` when given, then from the
/// configuration's `catalog_path`, and otherwise from the built-in corpus.
///
/// # Parameters
/// * `config_path` - Path to docguard.toml; a missing file means default configuration
/// * `catalog_override` - Catalog file that replaces the configured one
///
/// # Returns
/// * `Ok(Workspace)` - Loaded configuration and validated catalog
/// * `Err(LoadError)` - Error reading or validating either file
pub fn load(config_path: &Path, catalog_override: Option<&Path>) -> Result<Workspace, LoadError> {
    let config = SiteConfig::load_or_default(config_path)
        .map_err(|e| LoadError::ConfigError(config_path.to_path_buf(), Box::new(e)))?;

    let catalog_path = catalog_override.or(config.catalog_path.as_deref());
    let catalog = load_catalog(catalog_path)?;

    Ok(Workspace { config, catalog })
}

/// Load a catalog file, or the built-in corpus when no path is given
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, LoadError> {
    if path.is_none() {
        log::debug!("Using built-in catalog");
    }
    Catalog::load_or_builtin(path).map_err(LoadError::CatalogError)
}

/// Stage 2: Render the catalog into a site
///
/// # Parameters
/// * `workspace` - Loaded configuration and catalog
/// * `query` - Optional search query; only matching sections are rendered
pub fn render(workspace: &Workspace, query: Option<&str>) -> RenderedSite {
    let site = RenderedSite::build(&workspace.catalog, &workspace.config, query);

    log::info!(
        "Rendered {} of {} sections ({} words, {} code blocks, {} diagrams)",
        site.sections.len(),
        workspace.catalog.len(),
        site.word_count(),
        site.code_block_count(),
        site.diagram_count()
    );

    site
}

/// Stage 3: Export the rendered site
pub mod export {
    use super::ExportError;
    use crate::rendered_site::RenderedSite;
    use std::path::Path;

    /// Output format for exported sites
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ExportFormat {
        /// Single-page HTML site
        Html,
        /// Aggregated markdown document
        Markdown,
        /// Plain text
        Text,
    }

    impl ExportFormat {
        /// Pick a format from the output file extension
        ///
        /// # Returns
        /// * `Some(ExportFormat)` - `.html`/`.htm`, `.md`/`.markdown`, or `.txt`
        /// * `None` - Unknown or missing extension
        pub fn from_path(path: &Path) -> Option<Self> {
            let ext = path.extension()?.to_str()?.to_lowercase();
            match ext.as_str() {
                "html" | "htm" => Some(Self::Html),
                "md" | "markdown" => Some(Self::Markdown),
                "txt" => Some(Self::Text),
                _ => None,
            }
        }
    }

    /// Write `site` to `output_path` in the given format
    pub fn write(
        site: &RenderedSite,
        output_path: &Path,
        format: ExportFormat,
    ) -> Result<(), ExportError> {
        match format {
            ExportFormat::Html => crate::html_exporter::to_html(site, output_path)?,
            ExportFormat::Markdown => crate::markdown_exporter::to_markdown(site, output_path)?,
            ExportFormat::Text => crate::text_exporter::to_text_file(site, output_path)?,
        }
        Ok(())
    }
}

/// Loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Config error loading {path}: {source}", path = .0.display(), source = .1)]
    ConfigError(PathBuf, #[source] Box<SiteConfigError>),

    #[error("Catalog error: {0}")]
    CatalogError(#[source] CatalogError),
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("HTML export failed: {0}")]
    Html(#[from] crate::html_exporter::HtmlExportError),

    #[error("Markdown export failed: {0}")]
    Markdown(#[from] crate::markdown_exporter::MarkdownExportError),

    #[error("Text export failed: {0}")]
    Text(#[from] std::io::Error),
}
