//! Materializes collected skills under each tool's skills directory.
//!
//! Writes are full overwrites and idempotent; nothing outside the current
//! write set is touched, and paths matching a user override rule are left
//! alone so manual edits survive repeated syncs.

use anyhow::{Context, Result};
use std::path::Path;

use crate::agents;
use crate::assemble::CollectedSkill;
use crate::config::SkillConfig;
use crate::ui;

/// Counts reported after a write pass
#[derive(Debug, Default, Clone, Copy)]
pub struct WriteSummary {
    pub written: usize,
    pub overridden: usize,
}

/// Override rule match: the rule names either the exact file or a directory
/// prefix of it. Paths are relative to the working directory with `/`
/// separators.
pub fn is_overridden(rel_path: &str, rules: &[String]) -> bool {
    rules.iter().any(|rule| {
        let rule = rule.trim_end_matches('/');
        rel_path == rule || rel_path.starts_with(&format!("{}/", rule))
    })
}

/// Write every collected skill under each enabled tool's base directory.
/// Unknown tool identifiers are skipped silently; an empty agents list means
/// all known tools.
pub fn write_skills(
    skills: &[CollectedSkill],
    config: &SkillConfig,
    root: &Path,
) -> Result<WriteSummary> {
    let agent_names = if config.agents.is_empty() {
        agents::all_agents()
    } else {
        config.agents.clone()
    };

    let mut summary = WriteSummary::default();
    for agent in &agent_names {
        let Some(base) = agents::skills_dir(agent) else {
            continue;
        };

        for skill in skills {
            for file in &skill.files {
                // Relative path as the override rules see it, always
                // forward-slash separated
                let rel = format!("{}/{}/{}/{}", base, skill.category, skill.skill, file.name);
                if is_overridden(&rel, &config.overrides) {
                    ui::detail(format!("overridden {}", rel));
                    summary.overridden += 1;
                    continue;
                }

                let target = root.join(rel.split('/').collect::<std::path::PathBuf>());
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create {}", parent.display()))?;
                }
                std::fs::write(&target, &file.content)
                    .with_context(|| format!("Failed to write {}", target.display()))?;
                summary.written += 1;
            }
        }
    }
    Ok(summary)
}
