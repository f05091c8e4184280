//! Site configuration from docguard.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default name of the configuration file
pub const CONFIG_FILE_NAME: &str = "docguard.toml";

/// Main site configuration from docguard.toml
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Title shown in the page header and sidebar
    pub site_title: String,

    /// Short line shown under the title
    pub tagline: String,

    /// Optional external catalog (.toml or .json); the built-in corpus is used when absent
    pub catalog_path: Option<PathBuf>,

    /// Id of the section that is active when the page opens
    pub start_section: String,

    /// Colour theme of the generated page
    pub theme: Theme,

    /// Chat assistant settings
    pub assistant: AssistantConfig,
}

/// Colour theme of the generated page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Theme name passed to mermaid when drawing diagrams
    pub fn diagram_theme(self) -> &'static str {
        match self {
            Theme::Light => "neutral",
            Theme::Dark => "dark",
        }
    }

    /// CSS class put on the root element
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Chat assistant (generative-AI relay) settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Base URL of the generative language API
    pub endpoint: String,

    /// Model name used for generateContent calls
    pub model: String,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    /// Request timeout in seconds; 0 disables the timeout
    pub timeout_secs: u64,

    /// System instruction sent with every request
    pub system_instruction: String,

    /// First message of every chat session, attributed to the model
    pub greeting: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "Spring Guard".to_string(),
            tagline: "Ecosystem Guide".to_string(),
            catalog_path: None,
            start_section: "intro".to_string(),
            theme: Theme::default(),
            assistant: AssistantConfig::default(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-pro-preview".to_string(),
            api_key_env: "API_KEY".to_string(),
            timeout_secs: 60,
            system_instruction: "You are an expert Spring Boot Security consultant. Provide clear, concise, and code-heavy answers. If a user asks about a specific feature, try to provide a Java snippet. Focus on modern Spring Security 6+ best practices (e.g., Lambda configuration, SecurityFilterChain beans).".to_string(),
            greeting: "Hello! I'm your specialized Spring Security consultant. I'm trained on the latest documentation and best practices. How can I help you secure your application today?".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a docguard.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the docguard.toml configuration file
    ///
    /// # Returns
    /// * `Ok(SiteConfig)` - Successfully loaded configuration
    /// * `Err(SiteConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SiteConfigError> {
        let content = fs::read_to_string(&path).map_err(SiteConfigError::IoError)?;

        let mut config: SiteConfig =
            toml::from_str(&content).map_err(SiteConfigError::ParseError)?;

        // Relative catalog paths are resolved against the config file's directory
        if let (Some(catalog), Some(dir)) = (config.catalog_path.as_mut(), path.as_ref().parent())
        {
            if catalog.is_relative() {
                *catalog = dir.join(&*catalog);
            }
        }

        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, SiteConfigError> {
        let path = path.as_ref();
        if path.exists() {
            log::info!("Using configuration {}", path.display());
            Self::load(path)
        } else {
            log::debug!("{} not found, using default configuration", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to a docguard.toml file
    ///
    /// # Parameters
    /// * `path` - Path where the docguard.toml file will be written
    ///
    /// # Returns
    /// * `Ok(())` - Successfully saved configuration
    /// * `Err(SiteConfigError)` - Error serializing or writing the configuration file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SiteConfigError> {
        let content = toml::to_string_pretty(self).map_err(SiteConfigError::SerializeError)?;

        fs::write(&path, content).map_err(SiteConfigError::IoError)?;

        Ok(())
    }
}

/// Errors that can occur when loading or saving site configuration
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum SiteConfigError {
    /// IO error when reading or writing file
    #[error("IO error: {0}")]
    IoError(std::io::Error),

    /// Error parsing TOML
    #[error("TOML parse error: {0}")]
    ParseError(toml::de::Error),

    /// Error serializing to TOML
    #[error("TOML serialize error: {0}")]
    SerializeError(toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_config_roundtrip() {
        let config = SiteConfig {
            site_title: "Guard Docs".to_string(),
            tagline: "Internal Guide".to_string(),
            catalog_path: Some(PathBuf::from("/srv/docs/catalog.json")),
            start_section: "core-concepts".to_string(),
            theme: Theme::Dark,
            assistant: AssistantConfig {
                model: "gemini-2.5-flash".to_string(),
                ..AssistantConfig::default()
            },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: SiteConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.site_title, "Guard Docs");
        assert_eq!(parsed.start_section, "core-concepts");
        assert_eq!(parsed.theme, Theme::Dark);
        assert_eq!(parsed.assistant.model, "gemini-2.5-flash");
        assert_eq!(parsed.assistant.api_key_env, "API_KEY");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_content = r#"
site_title = "Security Handbook"
theme = "dark"

[assistant]
timeout_secs = 15
"#;

        let config: SiteConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.site_title, "Security Handbook");
        assert_eq!(config.tagline, "Ecosystem Guide");
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.assistant.timeout_secs, 15);
        assert_eq!(config.assistant.model, "gemini-3-pro-preview");
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_relative_catalog_path_resolved_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "catalog_path = \"catalog.toml\"\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.catalog_path, Some(dir.path().join("catalog.toml")));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::load_or_default(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config.site_title, "Spring Guard");
        assert_eq!(config.theme, Theme::Light);
    }

    #[test]
    fn test_diagram_theme() {
        assert_eq!(Theme::Light.diagram_theme(), "neutral");
        assert_eq!(Theme::Dark.diagram_theme(), "dark");
    }
}
