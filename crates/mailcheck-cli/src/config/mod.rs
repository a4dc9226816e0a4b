//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Lead source tag sent with relay submissions when none is configured.
pub const DEFAULT_SOURCE: &str = "mailcheck-cli";

/// Keys accepted by `mailcheck config set`.
pub const KEYS: &[(&str, &str)] = &[
    ("resolver_url", "DNS-over-HTTPS JSON endpoint"),
    ("relay_url", "Lead relay endpoint"),
    ("list_id", "Mailing list id forwarded to the relay"),
    ("source", "Lead source tag"),
    ("selectors", "Comma-separated DKIM selectors to try"),
    ("timeout_secs", "Per-lookup timeout in seconds"),
    ("output_format", "Default output format (pretty/json/csv/yaml)"),
];

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// DNS-over-HTTPS endpoint.
    pub resolver_url: Option<String>,

    /// Lead relay endpoint. Leads are only submitted when this is set.
    pub relay_url: Option<String>,

    /// Mailing list id forwarded to the relay.
    pub list_id: Option<String>,

    /// Lead source tag.
    pub source: Option<String>,

    /// DKIM selectors replacing the built-in list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selectors: Vec<String>,

    /// Per-lookup timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Get the config file path.
    ///
    /// `MAILCHECK_CONFIG` overrides the platform location.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os("MAILCHECK_CONFIG") {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("rs", "mailcheck", "mailcheck")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a file, defaulting when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Set a key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        let optional = || (!value.is_empty()).then(|| value.to_string());

        match key {
            "resolver_url" | "resolver" => self.resolver_url = optional(),
            "relay_url" | "relay" => self.relay_url = optional(),
            "list_id" => self.list_id = optional(),
            "source" => self.source = optional(),
            "selectors" => {
                self.selectors = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "timeout_secs" | "timeout" => {
                self.timeout_secs = match optional() {
                    Some(v) => Some(v.parse().with_context(|| {
                        format!("timeout_secs must be a whole number, got {v}")
                    })?),
                    None => None,
                };
            }
            "output_format" | "output" => {
                self.output_format = optional().map(|v| v.parse()).transpose()?;
            }
            _ => {
                let available: Vec<String> = KEYS
                    .iter()
                    .map(|(k, desc)| format!("  {k:<14} - {desc}"))
                    .collect();
                anyhow::bail!(
                    "Unknown config key: {}\n\nAvailable keys:\n{}",
                    key,
                    available.join("\n")
                );
            }
        }

        Ok(())
    }

    /// Lead source tag, falling back to [`DEFAULT_SOURCE`].
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(DEFAULT_SOURCE)
    }
}
