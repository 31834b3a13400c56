//! skillsync: sync curated skills from a remote registry into per-tool
//! configuration directories.

mod agents;
mod assemble;
mod config;
mod init;
mod reconcile;
mod registry;
mod ui;
mod write;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

use crate::config::SkillConfig;
use crate::registry::RegistryClient;

#[derive(Parser)]
#[command(name = "skillsync", version, about = "Sync curated skills into your AI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a skillsync.toml describing which skills and tools to track
    Init,
    /// Reconcile versions, fetch skills, and write them to every tool
    Sync,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Init => init::run(),
        Commands::Sync => sync().await,
    }
}

/// The full pipeline: reconcile -> assemble -> write.
/// Only configuration-level problems propagate out; everything network-shaped
/// degrades to skipped items with a status line.
async fn sync() -> Result<()> {
    let config_path = Path::new(config::CONFIG_FILE);
    let mut config = SkillConfig::load_from(config_path)?;
    let client = RegistryClient::new();

    // Reconciliation may rewrite pinned refs; it completes in full before
    // assembly starts
    reconcile::reconcile(&mut config, &client, config_path).await;

    let skills = assemble::collect_skills(&config, &client).await;
    if skills.is_empty() {
        ui::warn("No skills collected; nothing to write.");
        return Ok(());
    }

    let cwd = std::env::current_dir()?;
    let summary = write::write_skills(&skills, &config, &cwd)?;
    ui::success(format!(
        "Synced {} skill(s): {} file(s) written, {} overridden",
        skills.len(),
        summary.written,
        summary.overridden
    ));
    Ok(())
}
