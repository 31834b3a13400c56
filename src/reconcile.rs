//! Version reconciliation against the registry's published metadata.
//!
//! Compares each enabled category's pinned ref with the latest published tag
//! and, after a single confirmation, rewrites the config. Every failure in
//! here is "could not check": logged and never allowed to abort the sync.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::config::SkillConfig;
use crate::registry::{RegistryClient, RepoLocator};
use crate::ui;

/// Path of the version descriptor within the registry
pub const METADATA_PATH: &str = "skills/metadata.json";

/// Published version info for one category
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryMeta {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub tag_prefix: Option<String>,
}

impl CategoryMeta {
    /// Latest tag = tag_prefix + version; None unless both fields are present
    pub fn latest_tag(&self) -> Option<String> {
        match (&self.tag_prefix, &self.version) {
            (Some(prefix), Some(version)) => Some(format!("{}{}", prefix, version)),
            _ => None,
        }
    }
}

/// A proposed ref change for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCandidate {
    pub category: String,
    pub from: String,
    pub to: String,
}

/// Compute update candidates: every enabled category whose current ref
/// differs from its latest published tag. Categories with incomplete
/// metadata are never proposed.
pub fn plan_updates(
    config: &SkillConfig,
    metadata: &HashMap<String, CategoryMeta>,
) -> Vec<UpdateCandidate> {
    let mut candidates = Vec::new();
    for (category, cat_config) in config.enabled_categories() {
        let Some(latest) = metadata.get(category).and_then(|m| m.latest_tag()) else {
            continue;
        };
        let current = cat_config.effective_ref();
        if current != latest {
            candidates.push(UpdateCandidate {
                category: category.clone(),
                from: current.to_string(),
                to: latest,
            });
        }
    }
    candidates
}

/// Apply accepted candidates to the config in place
pub fn apply_updates(config: &mut SkillConfig, candidates: &[UpdateCandidate]) {
    for candidate in candidates {
        if let Some(cat) = config.categories.get_mut(&candidate.category) {
            cat.pinned_ref = Some(candidate.to.clone());
        }
    }
}

/// Check the registry for newer category tags and, if the user confirms,
/// rewrite and persist the configuration. Never fails.
pub async fn reconcile(config: &mut SkillConfig, client: &RegistryClient, config_path: &Path) {
    if let Err(e) = try_reconcile(config, client, config_path).await {
        ui::warn(format!("Could not check for updates: {:#}", e));
    }
}

async fn try_reconcile(
    config: &mut SkillConfig,
    client: &RegistryClient,
    config_path: &Path,
) -> Result<()> {
    // Registries without a recognizable locator are simply not reconciled
    let Some(locator) = RepoLocator::parse(&config.registry) else {
        return Ok(());
    };

    let branch = client
        .resolve_default_branch(&locator.owner, &locator.repo)
        .await
        .context("default branch lookup failed")?;

    let Some(raw) = client
        .fetch_raw(&locator.owner, &locator.repo, &branch, METADATA_PATH)
        .await
    else {
        // No metadata published at this registry; sync with pinned refs as-is
        return Ok(());
    };
    let metadata: HashMap<String, CategoryMeta> =
        serde_json::from_str(&raw).context("malformed registry metadata")?;

    let candidates = plan_updates(config, &metadata);
    if candidates.is_empty() {
        return Ok(());
    }

    ui::info("Updates available:");
    for candidate in &candidates {
        ui::detail(format!(
            "{}: {} -> {}",
            candidate.category, candidate.from, candidate.to
        ));
    }

    // One confirmation covering all candidates; a declined or failed prompt
    // leaves every ref untouched
    let confirmed = dialoguer::Confirm::new()
        .with_prompt("Update all pinned refs?")
        .default(true)
        .interact()
        .unwrap_or(false);
    if !confirmed {
        return Ok(());
    }

    apply_updates(config, &candidates);
    config.save_to(config_path)?;
    ui::success(format!("Updated {} categor(ies)", candidates.len()));
    Ok(())
}
