//! Command-line interface definitions for docguard

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the build command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Single-page HTML site with navigation, highlighting, and diagrams
    Html,
    /// One aggregated markdown document
    Markdown,
    /// Plain text
    Text,
}

/// CLI structure for the docguard application
#[derive(Parser)]
#[command(name = "docguard")]
#[command(version)]
#[command(about = "Spring Security documentation browser and assistant", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for docguard
#[derive(Subcommand)]
pub enum Commands {
    /// Create docguard.toml and an editable copy of the built-in catalog
    Init {
        /// Directory to initialize (defaults to current directory)
        path: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Build the documentation site
    Build {
        /// Configuration file
        #[arg(short, long, default_value = "docguard.toml")]
        config: PathBuf,

        /// Catalog file (.toml or .json), overriding the configured one
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output file path
        #[arg(short, long, default_value = "site/index.html")]
        output: PathBuf,

        /// Output format (detected from the output extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Only include sections matching this search query
        #[arg(short, long)]
        query: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Search section titles and bodies
    Search {
        /// Case-insensitive search text
        query: String,

        /// Configuration file
        #[arg(short, long, default_value = "docguard.toml")]
        config: PathBuf,

        /// Catalog file (.toml or .json), overriding the configured one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Print a section or subsection
    Show {
        /// Section or subsection id; the first section is shown when omitted
        id: Option<String>,

        /// Configuration file
        #[arg(short, long, default_value = "docguard.toml")]
        config: PathBuf,

        /// Catalog file (.toml or .json), overriding the configured one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Validate a catalog
    Validate {
        /// Catalog file (defaults to the built-in catalog)
        #[arg(value_name = "CATALOG")]
        catalog: Option<PathBuf>,

        /// Show detailed validation results
        #[arg(short, long)]
        verbose: bool,
    },

    /// Ask the assistant a single question
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,

        /// Configuration file
        #[arg(short, long, default_value = "docguard.toml")]
        config: PathBuf,
    },

    /// Start an interactive chat with the assistant
    Chat {
        /// Configuration file
        #[arg(short, long, default_value = "docguard.toml")]
        config: PathBuf,
    },
}
