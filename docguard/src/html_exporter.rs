//! HTML exporter for rendered sites
//!
//! This module exports a RenderedSite to a single HTML page with:
//! - A sidebar listing every section and its subsections
//! - Code blocks tagged for highlight.js
//! - Diagram descriptions handed to mermaid.js
//! - Light or dark styling from the site configuration

use crate::markup::{InlineSpan, RenderNode};
use crate::rendered_site::{RenderedSection, RenderedSite};
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

const HIGHLIGHT_JS_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/highlight.min.js";
const HIGHLIGHT_CSS_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/styles/github-dark.min.css";
const MERMAID_JS_URL: &str = "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.min.js";

/// Errors that can occur during HTML export
#[derive(Error, Debug)]
pub enum HtmlExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Export a rendered site to HTML format
///
/// # Parameters
/// * `site` - The rendered site to export
/// * `output_path` - Path where the HTML file will be written
///
/// # Returns
/// * `Ok(())` - Successfully exported to HTML
/// * `Err(HtmlExportError)` - Error during export
pub fn to_html(site: &RenderedSite, output_path: &Path) -> Result<(), HtmlExportError> {
    let output = render_page(site);

    // Write to file - create parent directories if they don't exist
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(output_path)?;
    file.write_all(output.as_bytes())?;

    log::info!(
        "Wrote {} ({} sections, {} bytes)",
        output_path.display(),
        site.sections.len(),
        output.len()
    );

    Ok(())
}

/// Render the complete page to a string
pub fn render_page(site: &RenderedSite) -> String {
    let mut output = String::new();

    write_html_header(&mut output, site);

    output.push_str("<body>\n");
    output.push_str("<div class=\"layout\">\n");

    write_sidebar(&mut output, site);

    output.push_str("<main class=\"content\">\n");
    if site.sections.is_empty() {
        output.push_str("<p class=\"empty\">No modules found</p>\n");
    }
    for section in &site.sections {
        write_section(&mut output, section, site.active_section_id.as_deref());
    }
    output.push_str("</main>\n");

    output.push_str("</div>\n");
    write_scripts(&mut output, site);
    output.push_str("</body>\n");
    output.push_str("</html>\n");

    output
}

/// Write HTML header with CSS styling
fn write_html_header(output: &mut String, site: &RenderedSite) {
    output.push_str("<!DOCTYPE html>\n");
    output.push_str(&format!(
        "<html lang=\"en\" class=\"{}\">\n",
        site.metadata.theme.css_class()
    ));
    output.push_str("<head>\n");
    output.push_str("<meta charset=\"UTF-8\">\n");
    output.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    output.push_str(&format!(
        "<title>{}</title>\n",
        escape_html(&site.metadata.title)
    ));
    output.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">\n",
        HIGHLIGHT_CSS_URL
    ));
    output.push_str("<style>\n");
    output.push_str(CSS_STYLES);
    output.push_str("</style>\n");
    output.push_str("</head>\n");
}

/// Write the navigation sidebar
fn write_sidebar(output: &mut String, site: &RenderedSite) {
    output.push_str("<aside class=\"sidebar\">\n");
    output.push_str(&format!(
        "<div class=\"brand\"><h2 class=\"site-title\">{}</h2><p class=\"tagline\">{}</p></div>\n",
        escape_html(&site.metadata.title),
        escape_html(&site.metadata.tagline)
    ));

    if let Some(ref query) = site.query {
        output.push_str(&format!(
            "<p class=\"search-note\">Filtered by: <strong>{}</strong></p>\n",
            escape_html(query)
        ));
    }

    output.push_str("<nav>\n");
    if site.sections.is_empty() {
        output.push_str("<p class=\"empty\">No modules found</p>\n");
    }

    let active_parent = site.active_parent_id();
    for section in &site.sections {
        let class = if active_parent == Some(section.id.as_str()) {
            "nav-section active"
        } else {
            "nav-section"
        };
        output.push_str(&format!(
            "<a class=\"{}\" href=\"#{}\">{}</a>\n",
            class,
            escape_html(&section.id),
            escape_html(&section.title)
        ));

        if !section.sub_sections.is_empty() {
            output.push_str("<ul class=\"nav-sub\">\n");
            for sub in &section.sub_sections {
                output.push_str(&format!(
                    "<li><a href=\"#{}\">{}</a></li>\n",
                    escape_html(&sub.id),
                    escape_html(&sub.title)
                ));
            }
            output.push_str("</ul>\n");
        }
    }
    output.push_str("</nav>\n");
    output.push_str("</aside>\n");
}

/// Write a single section and its subsections to the output
fn write_section(output: &mut String, section: &RenderedSection, active_id: Option<&str>) {
    output.push_str(&format!(
        "<section id=\"{}\"{}>\n",
        escape_html(&section.id),
        active_attr(active_id, &section.id)
    ));
    output.push_str(&format!(
        "<h2 class=\"section-heading\">{}</h2>\n",
        escape_html(&section.title)
    ));

    for node in &section.nodes {
        write_node(output, node);
    }

    for sub in &section.sub_sections {
        output.push_str(&format!(
            "<section id=\"{}\" class=\"sub-section\"{}>\n",
            escape_html(&sub.id),
            active_attr(active_id, &sub.id)
        ));
        output.push_str(&format!(
            "<h3 class=\"sub-heading\">{}</h3>\n",
            escape_html(&sub.title)
        ));
        for node in &sub.nodes {
            write_node(output, node);
        }
        output.push_str("</section>\n");
    }

    output.push_str("</section>\n");
}

fn active_attr(active_id: Option<&str>, id: &str) -> &'static str {
    if active_id == Some(id) {
        " data-active=\"true\""
    } else {
        ""
    }
}

/// Write a single render node to the output
fn write_node(output: &mut String, node: &RenderNode) {
    match node {
        RenderNode::Paragraph(_) => {
            output.push_str(&format!("<p>{}</p>\n", spans_to_html(&node.spans())));
        }

        RenderNode::Heading(_) => {
            output.push_str(&format!(
                "<h4 class=\"content-heading\">{}</h4>\n",
                spans_to_html(&node.spans())
            ));
        }

        RenderNode::ChecklistItem { checked, .. } => {
            let (class, checkbox) = if *checked {
                (
                    "checklist-item checked",
                    "<input type=\"checkbox\" checked disabled>",
                )
            } else {
                ("checklist-item", "<input type=\"checkbox\" disabled>")
            };
            output.push_str(&format!(
                "<div class=\"{}\">{} <span>{}</span></div>\n",
                class,
                checkbox,
                spans_to_html(&node.spans())
            ));
        }

        RenderNode::BulletItem(_) => {
            output.push_str(&format!(
                "<div class=\"bullet-item\"><span class=\"bullet\"></span><span>{}</span></div>\n",
                spans_to_html(&node.spans())
            ));
        }

        RenderNode::CodeBlock { language, code } => {
            output.push_str("<div class=\"code-block\">\n");
            output.push_str(&format!(
                "<div class=\"code-header\"><span class=\"code-language\">{}</span></div>\n",
                escape_html(language)
            ));
            output.push_str(&format!(
                "<pre><code class=\"{}\">{}</code></pre>\n",
                escape_html(&language_class(language)),
                escape_html(code)
            ));
            output.push_str("</div>\n");
        }

        RenderNode::DiagramBlock(text) => {
            output.push_str(&format!(
                "<div class=\"diagram\"><pre class=\"mermaid\">{}</pre></div>\n",
                escape_html(text.trim())
            ));
        }

        RenderNode::Spacer => {
            output.push_str("<div class=\"spacer\"></div>\n");
        }
    }
}

/// Convert inline spans to HTML string with formatting
fn spans_to_html(spans: &[InlineSpan]) -> String {
    let mut result = String::new();

    for span in spans {
        match span {
            InlineSpan::PlainText(text) => result.push_str(&escape_html(text)),
            InlineSpan::Bold(text) => {
                result.push_str(&format!("<strong>{}</strong>", escape_html(text)));
            }
            InlineSpan::InlineCode(text) => {
                result.push_str(&format!("<code>{}</code>", escape_html(text)));
            }
            InlineSpan::Link { label, url } => {
                result.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                    escape_html(url),
                    escape_html(label)
                ));
            }
        }
    }

    result
}

/// Map a documentation language label to a highlight.js class
fn language_class(language: &str) -> String {
    let lang = language.to_lowercase();
    match lang.as_str() {
        "yaml" | "yml" => "language-yaml".to_string(),
        "xml" | "pom.xml" => "language-xml".to_string(),
        "groovy" | "gradle" => "language-groovy".to_string(),
        "bash" | "shell" => "language-bash".to_string(),
        _ => format!("language-{}", lang),
    }
}

/// Write the highlight.js and mermaid.js loaders
fn write_scripts(output: &mut String, site: &RenderedSite) {
    output.push_str(&format!("<script src=\"{}\"></script>\n", HIGHLIGHT_JS_URL));
    output.push_str("<script>hljs.highlightAll();</script>\n");

    if site.has_diagrams() {
        let theme = site.metadata.theme;
        output.push_str(&format!("<script src=\"{}\"></script>\n", MERMAID_JS_URL));
        output.push_str(&format!(
            "<script>mermaid.initialize({{ startOnLoad: true, theme: '{}', securityLevel: 'loose', fontFamily: 'Plus Jakarta Sans', themeVariables: {{ primaryColor: '#10b981', primaryTextColor: '{}', lineColor: '{}' }} }});</script>\n",
            theme.diagram_theme(),
            match theme {
                crate::site_config::Theme::Dark => "#fff",
                crate::site_config::Theme::Light => "#000",
            },
            match theme {
                crate::site_config::Theme::Dark => "#334155",
                crate::site_config::Theme::Light => "#e2e8f0",
            }
        ));
    }
}

/// Escape HTML special characters
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Page styles; `html.dark` switches the palette
const CSS_STYLES: &str = r#"
:root {
    --bg: #ffffff;
    --sidebar-bg: #fcfdff;
    --text: #0f172a;
    --muted: #475569;
    --border: #e2e8f0;
    --accent: #10b981;
    --accent-strong: #059669;
    --code-bg: #f8fafc;
}

html.dark {
    --bg: #0b0f1a;
    --sidebar-bg: #0f172a;
    --text: #f1f5f9;
    --muted: #94a3b8;
    --border: #1e293b;
    --accent: #34d399;
    --accent-strong: #10b981;
    --code-bg: #1e293b;
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: 'Plus Jakarta Sans', -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto',
                 'Helvetica Neue', sans-serif;
    line-height: 1.6;
    color: var(--text);
    background-color: var(--bg);
}

.layout {
    display: flex;
    min-height: 100vh;
}

.sidebar {
    width: 20rem;
    flex-shrink: 0;
    position: sticky;
    top: 0;
    height: 100vh;
    overflow-y: auto;
    padding: 2.5rem 1.5rem;
    background-color: var(--sidebar-bg);
    border-right: 1px solid var(--border);
}

.brand {
    margin-bottom: 2rem;
}

.site-title {
    font-size: 1.25rem;
    font-weight: 800;
}

.tagline {
    font-size: 0.65rem;
    font-weight: 700;
    text-transform: uppercase;
    letter-spacing: 0.2em;
    color: var(--accent-strong);
}

.search-note {
    font-size: 0.8rem;
    color: var(--muted);
    margin-bottom: 1rem;
}

.nav-section {
    display: block;
    padding: 0.6rem 1rem;
    border-radius: 0.75rem;
    font-size: 0.8rem;
    font-weight: 700;
    color: var(--muted);
}

.nav-section.active {
    color: var(--text);
    background-color: var(--code-bg);
}

.nav-sub {
    list-style: none;
    margin: 0.25rem 0 1rem 1rem;
    border-left: 2px solid var(--border);
}

.nav-sub a {
    display: block;
    padding: 0.3rem 1rem;
    font-size: 0.75rem;
    color: var(--muted);
}

.content {
    flex: 1;
    max-width: 960px;
    padding: 4rem 3rem;
}

section {
    margin-bottom: 4rem;
}

.section-heading {
    font-size: 2.25rem;
    font-weight: 800;
    margin-bottom: 2rem;
    letter-spacing: -0.02em;
}

.sub-section {
    margin-top: 3rem;
    margin-bottom: 2rem;
}

.sub-heading {
    font-size: 1.5rem;
    font-weight: 700;
    margin-bottom: 1.5rem;
}

.content-heading {
    margin-top: 3rem;
    margin-bottom: 1.5rem;
    font-size: 0.75rem;
    text-transform: uppercase;
    letter-spacing: 0.1em;
    opacity: 0.7;
}

p {
    margin-bottom: 2rem;
    font-size: 1.1rem;
    color: var(--muted);
}

strong {
    font-weight: 700;
    color: var(--text);
}

code {
    font-family: 'JetBrains Mono', 'Monaco', 'Menlo', 'Consolas', monospace;
    background-color: var(--code-bg);
    padding: 0.1em 0.4em;
    border-radius: 0.4rem;
    border: 1px solid var(--border);
    font-size: 0.85em;
    font-weight: 600;
    color: var(--accent-strong);
}

.spacer {
    height: 1rem;
}

.bullet-item,
.checklist-item {
    display: flex;
    gap: 0.75rem;
    align-items: baseline;
    padding: 0.5rem 0 0.5rem 1rem;
    margin-bottom: 1rem;
    border-left: 2px solid var(--border);
    font-size: 1.1rem;
    color: var(--muted);
}

.bullet {
    width: 0.4rem;
    height: 0.4rem;
    border-radius: 50%;
    background-color: var(--accent);
    flex-shrink: 0;
    transform: translateY(-0.15rem);
}

.checklist-item input[type="checkbox"] {
    accent-color: var(--accent);
}

.checklist-item.checked {
    color: var(--text);
}

.code-block {
    margin: 2.5rem 0;
    border-radius: 1.5rem;
    overflow: hidden;
    border: 1px solid var(--border);
    background-color: #0d1117;
}

.code-header {
    padding: 1rem 1.5rem;
    background-color: #161b22;
    border-bottom: 1px solid #1e293b;
}

.code-language {
    font-size: 0.65rem;
    font-weight: 700;
    text-transform: uppercase;
    letter-spacing: 0.2em;
    color: #94a3b8;
}

.code-block pre {
    padding: 2rem;
    overflow-x: auto;
    white-space: pre-wrap;
    word-break: break-word;
}

.code-block pre code {
    background: none;
    border: none;
    padding: 0;
    color: #cbd5e1;
    font-weight: 400;
    font-size: 0.9rem;
    line-height: 1.6;
}

.diagram {
    margin: 2.5rem 0;
    padding: 2rem;
    border-radius: 1.5rem;
    border: 1px solid var(--border);
    background-color: var(--code-bg);
    overflow-x: hidden;
}

.diagram .mermaid {
    display: flex;
    justify-content: center;
}

.empty {
    text-align: center;
    font-size: 0.75rem;
    font-weight: 700;
    text-transform: uppercase;
    letter-spacing: 0.1em;
    color: var(--muted);
}

a {
    color: var(--accent-strong);
    font-weight: 700;
    text-decoration: none;
}

a:hover {
    text-decoration: underline;
}

@media print {
    .sidebar {
        display: none;
    }

    section {
        page-break-inside: avoid;
    }
}

@media screen and (max-width: 1024px) {
    .sidebar {
        display: none;
    }

    .content {
        padding: 2rem 1.25rem;
    }
}
"#;
