//! Skill discovery and collection.
//!
//! Walks the registry tree for each enabled category, applies the
//! include/exclude filters, and fetches the member files of every qualifying
//! skill into an in-memory set for the writer.

use crate::config::{CategoryConfig, SkillConfig};
use crate::registry::{RegistryClient, RepoLocator, TreeEntry};
use crate::ui;

/// Top-level manifest every skill carries
pub const MANIFEST_FILE: &str = "SKILL.md";

/// Recognized subfolders within a skill; anything else is never synchronized
pub const SKILL_SUBDIRS: &[&str] = &["references/", "scripts/", "assets/"];

/// One fetched file of a skill
#[derive(Debug, Clone)]
pub struct SkillFile {
    /// Path relative to the skill folder, e.g. "references/api.md"
    pub name: String,
    pub content: String,
}

/// A skill with all of its successfully fetched files
#[derive(Debug, Clone)]
pub struct CollectedSkill {
    pub category: String,
    pub skill: String,
    pub files: Vec<SkillFile>,
}

/// Collect every enabled skill across all enabled categories.
///
/// Categories are processed independently and sequentially; a category whose
/// tree cannot be listed is skipped, not fatal. An unsupported registry
/// locator short-circuits to an empty set before any network call.
pub async fn collect_skills(config: &SkillConfig, client: &RegistryClient) -> Vec<CollectedSkill> {
    let Some(locator) = RepoLocator::parse(&config.registry) else {
        ui::error(format!(
            "Unsupported registry '{}': expected github.com/owner/repo",
            config.registry
        ));
        return Vec::new();
    };

    let mut collected = Vec::new();
    for (category, cat_config) in config.enabled_categories() {
        let git_ref = cat_config.effective_ref();
        let tree = client.list_tree(&locator.owner, &locator.repo, git_ref).await;
        if tree.is_empty() {
            ui::warn(format!("Category '{}': nothing found at ref '{}'", category, git_ref));
            continue;
        }

        for skill in skill_names(&tree, category) {
            if !passes_filters(&skill, cat_config) {
                continue;
            }

            let prefix = format!("skills/{}/{}/", category, skill);
            let mut files = Vec::new();
            for entry in &tree {
                if !entry.is_blob() {
                    continue;
                }
                let Some(rel) = entry.path.strip_prefix(&prefix) else {
                    continue;
                };
                if !eligible_path(rel) {
                    continue;
                }
                match client
                    .fetch_raw(&locator.owner, &locator.repo, git_ref, &entry.path)
                    .await
                {
                    Some(content) => files.push(SkillFile {
                        name: rel.to_string(),
                        content,
                    }),
                    None => ui::detail(format!("dropped {} (fetch failed)", entry.path)),
                }
            }

            // A skill with no surviving files is omitted entirely
            if !files.is_empty() {
                collected.push(CollectedSkill {
                    category: category.clone(),
                    skill,
                    files,
                });
            }
        }
    }
    collected
}

/// Distinct skill folder names under `skills/{category}/`, first-seen order
fn skill_names(tree: &[TreeEntry], category: &str) -> Vec<String> {
    let prefix = format!("skills/{}/", category);
    let mut names: Vec<String> = Vec::new();
    for entry in tree {
        let Some(rest) = entry.path.strip_prefix(&prefix) else {
            continue;
        };
        let Some(name) = rest.split('/').next() else {
            continue;
        };
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Apply include then exclude. A name absent from a non-empty include list is
/// skipped before exclude is even considered.
fn passes_filters(skill: &str, config: &CategoryConfig) -> bool {
    if let Some(include) = &config.include {
        if !include.iter().any(|n| n == skill) {
            return false;
        }
    }
    if let Some(exclude) = &config.exclude {
        if exclude.iter().any(|n| n == skill) {
            return false;
        }
    }
    true
}

/// Content-shape contract: only the top-level manifest and the recognized
/// subfolders are part of a skill.
fn eligible_path(rel: &str) -> bool {
    rel == MANIFEST_FILE || SKILL_SUBDIRS.iter().any(|dir| rel.starts_with(dir))
}
