//! docguard - Spring Security documentation browser and assistant
//!
//! A CLI tool that renders a catalog of Spring Security documentation into a
//! single-page site, searches and prints it in the terminal, and relays
//! questions to a generative-AI assistant.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::enum_variant_names)]

mod assistant;
mod catalog;
mod cli;
mod markup;
mod rendered_site;
mod site_config;

// Three-stage pipeline
mod pipeline;

// Exporters
mod html_exporter;
mod markdown_exporter;
mod text_exporter;

use anyhow::{Context, Result};
use assistant::{ChatMessage, ChatSession, GeminiClient};
use catalog::{Catalog, CatalogEntry};
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use markup::{fence_count, fenced_blocks, DIAGRAM_LANGUAGE};
use pipeline::export::ExportFormat;
use site_config::{SiteConfig, CONFIG_FILE_NAME};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// File name of the catalog written by `init`
const CATALOG_FILE_NAME: &str = "catalog.toml";

/// Main entry point for the docguard CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, force } => {
            init_logging(false);
            handle_init_command(path, force)?;
        }

        Commands::Build {
            config,
            catalog,
            output,
            format,
            query,
            verbose,
        } => {
            init_logging(verbose);
            handle_build_command(&config, catalog.as_deref(), output, format, query, verbose)?;
        }

        Commands::Search {
            query,
            config,
            catalog,
        } => {
            init_logging(false);
            handle_search_command(&query, &config, catalog.as_deref())?;
        }

        Commands::Show {
            id,
            config,
            catalog,
        } => {
            init_logging(false);
            handle_show_command(id.as_deref(), &config, catalog.as_deref())?;
        }

        Commands::Validate { catalog, verbose } => {
            init_logging(verbose);
            handle_validate_command(catalog.as_deref(), verbose)?;
        }

        Commands::Ask { question, config } => {
            init_logging(false);
            handle_ask_command(&question.join(" "), &config)?;
        }

        Commands::Chat { config } => {
            init_logging(false);
            handle_chat_command(&config)?;
        }
    }

    Ok(())
}

/// Initialize logging; `RUST_LOG` still applies on top of the default level
fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Handle the init command
fn handle_init_command(path: Option<PathBuf>, force: bool) -> Result<()> {
    let target_path = path.unwrap_or_else(|| PathBuf::from("."));

    println!("Initializing documentation workspace");
    println!("Target path: {}", target_path.display());

    // Create the target directory if it doesn't exist
    if !target_path.exists() {
        std::fs::create_dir_all(&target_path)
            .with_context(|| format!("Failed to create directory {}", target_path.display()))?;
    }

    // Check if directory is empty (unless force flag is set)
    if !force {
        check_directory_empty(&target_path)?;
    }

    let config = SiteConfig {
        catalog_path: Some(PathBuf::from(CATALOG_FILE_NAME)),
        ..SiteConfig::default()
    };
    let config_path = target_path.join(CONFIG_FILE_NAME);
    config
        .save(&config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    let catalog_path = target_path.join(CATALOG_FILE_NAME);
    let catalog_text = Catalog::builtin()
        .context("Built-in catalog is invalid")?
        .to_toml_string()
        .context("Failed to serialize the built-in catalog")?;
    std::fs::write(&catalog_path, catalog_text)
        .with_context(|| format!("Failed to write {}", catalog_path.display()))?;

    println!("\n✓ Successfully created 2 files");
    println!("\nNext steps:");
    println!("  1. Edit {} to configure the site", CONFIG_FILE_NAME);
    println!("  2. Edit the sections in {}", CATALOG_FILE_NAME);
    println!("  3. Run 'docguard build' to generate the site");

    Ok(())
}

/// Handle the build command
fn handle_build_command(
    config_path: &Path,
    catalog_path: Option<&Path>,
    mut output: PathBuf,
    format_arg: Option<OutputFormat>,
    query: Option<String>,
    verbose: bool,
) -> Result<()> {
    // Auto-detect format from output file extension if not explicitly specified
    let format = match format_arg {
        Some(fmt) => {
            let format = export_format(fmt);
            // Format explicitly specified, add appropriate extension if missing
            if output.extension().is_none() {
                output.set_extension(match format {
                    ExportFormat::Html => "html",
                    ExportFormat::Markdown => "md",
                    ExportFormat::Text => "txt",
                });
            }
            format
        }
        None => match ExportFormat::from_path(&output) {
            Some(format) => format,
            None if output.extension().is_none() => {
                output.set_extension("html");
                ExportFormat::Html
            }
            None => {
                anyhow::bail!(
                    "Unknown output format for '{}'. Supported: .html, .md, .txt\nUse --format to specify explicitly.",
                    output.display()
                );
            }
        },
    };

    println!("Building documentation...");
    println!("Output: {}", output.display());

    // Stage 1: Load configuration and catalog
    println!("\n[Stage 1/3] Loading catalog...");
    let workspace = pipeline::load(config_path, catalog_path)
        .with_context(|| format!("Failed to load workspace from {}", config_path.display()))?;
    println!(
        "✓ Loaded {} sections ({} entries)",
        workspace.catalog.len(),
        workspace.catalog.entry_count()
    );

    // Stage 2: Render section bodies
    println!("\n[Stage 2/3] Rendering sections...");
    let site = pipeline::render(&workspace, query.as_deref());
    println!("✓ Rendered {} sections", site.sections.len());
    if verbose {
        println!("  - {} words", site.word_count());
        println!("  - {} code blocks", site.code_block_count());
        println!("  - {} diagrams", site.diagram_count());
    }

    // Stage 3: Export to output format
    println!(
        "\n[Stage 3/3] Exporting to {}...",
        match format {
            ExportFormat::Html => "HTML",
            ExportFormat::Markdown => "Markdown",
            ExportFormat::Text => "text",
        }
    );
    pipeline::export::write(&site, &output, format)
        .with_context(|| format!("Failed to export to {}", output.display()))?;
    println!("✓ Successfully wrote: {}", output.display());

    println!("\n✓ Build completed successfully!");

    Ok(())
}

fn export_format(format: OutputFormat) -> ExportFormat {
    match format {
        OutputFormat::Html => ExportFormat::Html,
        OutputFormat::Markdown => ExportFormat::Markdown,
        OutputFormat::Text => ExportFormat::Text,
    }
}

/// Handle the search command
fn handle_search_command(query: &str, config_path: &Path, catalog_path: Option<&Path>) -> Result<()> {
    let workspace = pipeline::load(config_path, catalog_path)
        .with_context(|| format!("Failed to load workspace from {}", config_path.display()))?;

    let hits = workspace.catalog.search(query);
    if hits.is_empty() {
        println!("No modules found");
        return Ok(());
    }

    for hit in &hits {
        let marker = if hit.own_match { "*" } else { " " };
        println!("{} {:<24} {}", marker, hit.section.id, hit.section.title);
        for sub in &hit.matched_sub_sections {
            println!("    {:<22} {}", sub.id, sub.title);
        }
    }
    println!("\n{} of {} sections match", hits.len(), workspace.catalog.len());

    Ok(())
}

/// Handle the show command
fn handle_show_command(id: Option<&str>, config_path: &Path, catalog_path: Option<&Path>) -> Result<()> {
    let workspace = pipeline::load(config_path, catalog_path)
        .with_context(|| format!("Failed to load workspace from {}", config_path.display()))?;
    let catalog = &workspace.catalog;

    let entry = match id {
        Some(id) => match catalog.find_by_id(id) {
            Some(entry) => Some(entry),
            None => {
                let first = catalog.first().map(CatalogEntry::Section);
                if let Some(ref fallback) = first {
                    eprintln!("Section '{}' not found, showing '{}'", id, fallback.id());
                }
                first
            }
        },
        None => catalog.first().map(CatalogEntry::Section),
    };

    let Some(entry) = entry else {
        println!("No modules found");
        return Ok(());
    };

    let title = match entry {
        CatalogEntry::Section(_) => entry.title().to_string(),
        CatalogEntry::SubSection { parent, .. } => format!("{} / {}", parent.title, entry.title()),
    };
    print!(
        "{}",
        text_exporter::render_entry(&title, &markup::render(entry.content()))
    );

    if let CatalogEntry::Section(section) = entry {
        for sub in &section.sub_sections {
            print!(
                "{}",
                text_exporter::render_entry(&sub.title, &markup::render(&sub.content))
            );
        }
    }

    Ok(())
}

/// Handle the validate command
fn handle_validate_command(catalog_path: Option<&Path>, verbose: bool) -> Result<()> {
    println!("Validating catalog...");
    match catalog_path {
        Some(path) => println!("Input: {}", path.display()),
        None => println!("Input: built-in catalog"),
    }

    let catalog = pipeline::load_catalog(catalog_path).context("Catalog is invalid")?;

    let mut warnings = 0;
    for section in catalog.sections() {
        let entries = std::iter::once((section.id.as_str(), section.content.as_str())).chain(
            section
                .sub_sections
                .iter()
                .map(|sub| (sub.id.as_str(), sub.content.as_str())),
        );
        for (id, content) in entries {
            let issues = body_warnings(content);
            if verbose && issues.is_empty() {
                println!("  ✓ {}", id);
            }
            for issue in &issues {
                println!("  ! {}: {}", id, issue);
            }
            warnings += issues.len();
        }
    }

    println!(
        "\n✓ {} sections, {} entries, ids unique",
        catalog.len(),
        catalog.entry_count()
    );
    if warnings > 0 {
        println!("{} warning(s)", warnings);
    }

    Ok(())
}

/// Markup problems that render without error but probably aren't intended
fn body_warnings(content: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    if fence_count(content) % 2 == 1 {
        warnings.push("unterminated code fence".to_string());
    }

    let empty_diagrams = fenced_blocks(content)
        .filter(|(tag, code)| *tag == DIAGRAM_LANGUAGE && code.trim().is_empty())
        .count();
    if empty_diagrams > 0 {
        warnings.push(format!("{} empty diagram block(s) will be dropped", empty_diagrams));
    }

    warnings
}

/// Handle the ask command
fn handle_ask_command(question: &str, config_path: &Path) -> Result<()> {
    let config = SiteConfig::load_or_default(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let client = GeminiClient::from_config(&config.assistant);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let reply = runtime.block_on(client.ask(&[ChatMessage::user(question)]));
    println!("{}", reply);

    Ok(())
}

/// Handle the chat command
fn handle_chat_command(config_path: &Path) -> Result<()> {
    let config = SiteConfig::load_or_default(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let client = GeminiClient::from_config(&config.assistant);
    println!("Connected to {} (type 'exit' to quit)\n", client.model());

    let mut session = ChatSession::new(client, &config.assistant.greeting);
    if let Some(greeting) = session.transcript().first() {
        println!("assistant> {}\n", greeting.text);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("Failed to read from stdin")?;
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }

        if let Some(reply) = runtime.block_on(session.send(&line)) {
            println!("assistant> {}\n", reply.text);
        }
    }

    Ok(())
}

/// Check if a directory is empty
fn check_directory_empty(path: &Path) -> Result<()> {
    if let Ok(entries) = std::fs::read_dir(path) {
        if entries.count() > 0 {
            anyhow::bail!("Target directory is not empty. Use --force to overwrite existing files");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_warnings_clean() {
        assert!(body_warnings("Text\n```java\nint x;\n```\nMore").is_empty());
    }

    #[test]
    fn test_body_warnings_unterminated_fence() {
        assert_eq!(
            body_warnings("Text\n```java\nint x;"),
            vec!["unterminated code fence".to_string()]
        );
    }

    #[test]
    fn test_body_warnings_empty_diagram() {
        assert_eq!(
            body_warnings("```mermaid\n\n```"),
            vec!["1 empty diagram block(s) will be dropped".to_string()]
        );
    }

    #[test]
    fn test_export_format_mapping() {
        assert_eq!(export_format(OutputFormat::Markdown), ExportFormat::Markdown);
        assert_eq!(export_format(OutputFormat::Text), ExportFormat::Text);
    }

    #[test]
    fn test_builtin_catalog_has_no_warnings() {
        let catalog = Catalog::builtin().unwrap();
        for section in catalog.sections() {
            assert!(body_warnings(&section.content).is_empty(), "{}", section.id);
            for sub in &section.sub_sections {
                assert!(body_warnings(&sub.content).is_empty(), "{}", sub.id);
            }
        }
    }
}
