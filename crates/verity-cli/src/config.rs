//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use verity_analyzer::{AnalyzerConfig, ClassifierProfile};
use verity_domain::{Language, ResponseScheme};
use verity_llm::{generative, tag_code};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available classifier profiles
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Analysis pipeline settings
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// File this configuration was loaded from
    #[serde(skip)]
    location: Option<PathBuf>,
}

/// Classifier profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Response scheme of the endpoint
    pub scheme: Scheme,

    /// Endpoint URL
    pub endpoint: String,
}

/// Response scheme as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    /// Short tag-code sentiment service (legacy)
    TagCode,
    /// Generative model returning JSON in free text
    Generative,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Default language code for analyses
    #[serde(default = "default_language")]
    pub language: String,

    /// Database path (defaults to ~/.verity/verity.db)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding config, database and REPL history.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".verity"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from `path`, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.analyzer.validate().map_err(CliError::Config)?;
            config
        } else {
            Self::default()
        };
        config.location = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration back to where it was loaded from.
    pub fn save(&self) -> Result<()> {
        match &self.location {
            Some(path) => self.save_to(path),
            None => self.save_to(&Self::path()?),
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Database path, from settings or the default location.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.settings.database {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::dir()?.join("verity.db")),
        }
    }

    /// Default language for analyses.
    pub fn language(&self) -> Language {
        Language::parse(&self.settings.language).unwrap_or_default()
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            "gemini".to_string(),
            Profile {
                scheme: Scheme::Generative,
                endpoint: generative::DEFAULT_ENDPOINT.to_string(),
            },
        );
        profiles.insert(
            "meaningcloud".to_string(),
            Profile {
                scheme: Scheme::TagCode,
                endpoint: tag_code::DEFAULT_ENDPOINT.to_string(),
            },
        );

        Self {
            active_profile: default_profile(),
            profiles,
            settings: Settings::default(),
            analyzer: AnalyzerConfig::default(),
            location: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            language: default_language(),
            database: None,
        }
    }
}

impl From<Scheme> for ResponseScheme {
    fn from(scheme: Scheme) -> Self {
        match scheme {
            Scheme::TagCode => ResponseScheme::TagCode,
            Scheme::Generative => ResponseScheme::Generative,
        }
    }
}

impl From<&Profile> for ClassifierProfile {
    fn from(profile: &Profile) -> Self {
        ClassifierProfile::new(profile.scheme.into(), profile.endpoint.clone())
    }
}

fn default_profile() -> String {
    "gemini".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_language() -> String {
    Language::default().code().to_string()
}
