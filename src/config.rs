use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the configuration file at the project root
pub const CONFIG_FILE: &str = "skillsync.toml";

/// Registry locator used when the user accepts the default during init
pub const DEFAULT_REGISTRY: &str = "github.com/skillsync/registry";

/// Per-category sync settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Tag or branch to sync from; defaults to the registry's primary branch
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub pinned_ref: Option<String>,
    /// When present, only skills named here are synced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    /// Skills named here are never synced (applied after `include`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pinned_ref: None,
            include: None,
            exclude: None,
        }
    }
}

impl CategoryConfig {
    /// The ref to fetch this category at, falling back to "main"
    pub fn effective_ref(&self) -> &str {
        self.pinned_ref.as_deref().unwrap_or("main")
    }
}

/// Main configuration structure, persisted as skillsync.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SkillConfig {
    /// Registry locator in "github.com/owner/repo" form
    #[serde(default = "default_registry")]
    pub registry: String,
    /// Tool identifiers to install skills for; empty means all known tools
    #[serde(default)]
    pub agents: Vec<String>,
    /// Category name -> sync settings (BTreeMap keeps output order stable)
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryConfig>,
    /// Paths (file or directory prefix) the writer must never overwrite
    #[serde(default)]
    pub overrides: Vec<String>,
}

fn default_registry() -> String {
    DEFAULT_REGISTRY.to_string()
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            registry: default_registry(),
            agents: Vec::new(),
            categories: BTreeMap::new(),
            overrides: Vec::new(),
        }
    }
}

impl SkillConfig {
    /// Load configuration from a specific path.
    /// A missing file is fatal: sync cannot run before init.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!(
                "{} not found. Run `skillsync init` to create one.",
                path.display()
            );
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: SkillConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Persist configuration back to a path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Categories with enabled = true, in stable name order
    pub fn enabled_categories(&self) -> impl Iterator<Item = (&String, &CategoryConfig)> {
        self.categories.iter().filter(|(_, c)| c.enabled)
    }
}
