//! Interactive `init` wizard: writes a fresh skillsync.toml.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use std::path::Path;

use crate::agents::KNOWN_AGENTS;
use crate::config::{CategoryConfig, SkillConfig, CONFIG_FILE, DEFAULT_REGISTRY};
use crate::registry::RepoLocator;
use crate::ui;

pub fn run() -> Result<()> {
    let theme = ColorfulTheme::default();
    let config_path = Path::new(CONFIG_FILE);

    if config_path.exists() {
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt(format!("{} already exists. Overwrite?", CONFIG_FILE))
            .default(false)
            .interact()?;
        if !overwrite {
            ui::info("Keeping existing configuration.");
            return Ok(());
        }
    }

    let registry: String = Input::with_theme(&theme)
        .with_prompt("Registry (github.com/owner/repo)")
        .default(DEFAULT_REGISTRY.to_string())
        .validate_with(|input: &String| -> Result<(), &str> {
            if RepoLocator::parse(input).is_some() {
                Ok(())
            } else {
                Err("expected the form github.com/owner/repo")
            }
        })
        .interact_text()?;

    let agent_names: Vec<&str> = KNOWN_AGENTS.iter().map(|(name, _)| *name).collect();
    let selected = MultiSelect::with_theme(&theme)
        .with_prompt("Tools to install skills for (empty = all)")
        .items(&agent_names)
        .interact()?;
    let agents: Vec<String> = selected.iter().map(|&i| agent_names[i].to_string()).collect();

    let categories_input: String = Input::with_theme(&theme)
        .with_prompt("Categories to track (comma-separated)")
        .allow_empty(true)
        .interact_text()?;

    let mut config = SkillConfig {
        registry,
        agents,
        ..Default::default()
    };
    for name in categories_input.split(',') {
        let name = name.trim();
        if !name.is_empty() {
            config
                .categories
                .insert(name.to_string(), CategoryConfig::default());
        }
    }

    config.save_to(config_path)?;
    ui::success(format!("Created {}", CONFIG_FILE));
    ui::info("Run `skillsync sync` to install skills.");
    Ok(())
}
