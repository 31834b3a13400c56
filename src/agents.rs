//! Static table of known tool integrations.

/// Tool identifier -> skills directory relative to the project root.
/// Each tool keeps its installed skills under its own dot-directory.
pub const KNOWN_AGENTS: &[(&str, &str)] = &[
    ("claude", ".claude/skills"),
    ("codex", ".codex/skills"),
    ("cursor", ".cursor/skills"),
    ("gemini", ".gemini/skills"),
    ("windsurf", ".windsurf/skills"),
];

/// Look up a tool's skills directory. Unknown identifiers get `None` and are
/// skipped by the writer.
pub fn skills_dir(agent: &str) -> Option<&'static str> {
    KNOWN_AGENTS
        .iter()
        .find(|(name, _)| *name == agent)
        .map(|(_, dir)| *dir)
}

/// All known tool identifiers, used when the config lists no agents
pub fn all_agents() -> Vec<String> {
    KNOWN_AGENTS.iter().map(|(name, _)| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_agent_lookup() {
        assert_eq!(skills_dir("claude"), Some(".claude/skills"));
        assert_eq!(skills_dir("cursor"), Some(".cursor/skills"));
    }

    #[test]
    fn test_unknown_agent_lookup() {
        assert_eq!(skills_dir("emacs"), None);
    }

    #[test]
    fn test_all_agents_matches_table() {
        assert_eq!(all_agents().len(), KNOWN_AGENTS.len());
    }
}
