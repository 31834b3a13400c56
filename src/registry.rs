//! GitHub-backed skill registry client.
//!
//! Translates a registry locator plus a ref into tree listings and raw file
//! contents. Non-success responses from the tree and raw endpoints degrade to
//! empty/absent results so one unreachable ref never aborts a whole sync.

use anyhow::{bail, Result};
use serde::Deserialize;

/// API base for repository metadata and tree listings
const GITHUB_API_BASE: &str = "https://api.github.com";

/// Base for raw file content
const GITHUB_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// User-Agent sent with every request (GitHub rejects anonymous agents)
const USER_AGENT: &str = concat!("skillsync/", env!("CARGO_PKG_VERSION"));

/// Parsed "github.com/owner/repo" locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocator {
    pub owner: String,
    pub repo: String,
}

impl RepoLocator {
    /// Parse a registry locator. Only GitHub locators are supported; anything
    /// else yields `None` before any network call is attempted.
    pub fn parse(locator: &str) -> Option<Self> {
        let s = locator.trim().trim_end_matches('/').trim_end_matches(".git");
        let s = s
            .strip_prefix("https://")
            .or_else(|| s.strip_prefix("http://"))
            .unwrap_or(s);
        let rest = s.strip_prefix("github.com/")?;
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            return None;
        }
        Some(Self {
            owner: parts[0].to_string(),
            repo: parts[1].to_string(),
        })
    }
}

/// One entry from a recursive tree listing
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    /// "blob" for files, "tree" for directories
    #[serde(rename = "type")]
    pub entry_type: String,
}

impl TreeEntry {
    pub fn is_blob(&self) -> bool {
        self.entry_type == "blob"
    }
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    default_branch: String,
}

/// HTTP client for one registry repository
pub struct RegistryClient {
    client: reqwest::Client,
    api_base: String,
    raw_base: String,
    /// Bearer token for API calls, taken from GITHUB_TOKEN when set
    token: Option<String>,
}

impl RegistryClient {
    pub fn new() -> Self {
        Self::with_bases(GITHUB_API_BASE, GITHUB_RAW_BASE)
    }

    /// Build a client against explicit endpoint bases (tests point these at a
    /// local mock server)
    pub fn with_bases(api_base: &str, raw_base: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            raw_base: raw_base.trim_end_matches('/').to_string(),
            token: std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.get(url).header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Look up the repository's default branch.
    /// Unlike tree/raw lookups this is an error on non-success, because the
    /// caller has no sensible ref to proceed with.
    pub async fn resolve_default_branch(&self, owner: &str, repo: &str) -> Result<String> {
        let url = format!("{}/repos/{}/{}", self.api_base, owner, repo);
        let resp = self.get(&url).send().await?;
        if !resp.status().is_success() {
            bail!("registry unavailable: {}/{} (HTTP {})", owner, repo, resp.status());
        }
        let info: RepoResponse = resp.json().await?;
        Ok(info.default_branch)
    }

    /// Fetch the full recursive tree at a ref.
    /// Any failure (network, non-success status, malformed body) yields an
    /// empty list so callers can treat "no content at this ref" as skippable.
    pub async fn list_tree(&self, owner: &str, repo: &str, git_ref: &str) -> Vec<TreeEntry> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base, owner, repo, git_ref
        );
        let resp = match self.get(&url).send().await {
            Ok(r) if r.status().is_success() => r,
            _ => return Vec::new(),
        };
        match resp.json::<TreeResponse>().await {
            Ok(body) => body.tree,
            Err(_) => Vec::new(),
        }
    }

    /// Fetch one file's raw text at a ref.
    /// Absence (any non-success condition) is `None`, never an error.
    pub async fn fetch_raw(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        path: &str,
    ) -> Option<String> {
        let url = format!("{}/{}/{}/{}/{}", self.raw_base, owner, repo, git_ref, path);
        let resp = self.get(&url).send().await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.text().await.ok()
    }
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locator_valid() {
        let loc = RepoLocator::parse("github.com/acme/skills").unwrap();
        assert_eq!(loc.owner, "acme");
        assert_eq!(loc.repo, "skills");

        let loc = RepoLocator::parse("https://github.com/acme/skills.git").unwrap();
        assert_eq!(loc.owner, "acme");
        assert_eq!(loc.repo, "skills");

        let loc = RepoLocator::parse("github.com/acme/skills/").unwrap();
        assert_eq!(loc.repo, "skills");
    }

    #[test]
    fn test_parse_locator_rejects_other_hosts() {
        assert!(RepoLocator::parse("gitlab.com/acme/skills").is_none());
        assert!(RepoLocator::parse("acme/skills").is_none());
        assert!(RepoLocator::parse("github.com/acme").is_none());
        assert!(RepoLocator::parse("github.com/acme/skills/extra").is_none());
        assert!(RepoLocator::parse("github.com//skills").is_none());
    }

    #[tokio::test]
    async fn test_resolve_default_branch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/acme/skills")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"default_branch": "trunk"}"#)
            .create_async()
            .await;

        let client = RegistryClient::with_bases(&server.url(), &server.url());
        let branch = client.resolve_default_branch("acme", "skills").await.unwrap();
        assert_eq!(branch, "trunk");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_resolve_default_branch_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/acme/skills")
            .with_status(503)
            .create_async()
            .await;

        let client = RegistryClient::with_bases(&server.url(), &server.url());
        assert!(client.resolve_default_branch("acme", "skills").await.is_err());
    }

    #[tokio::test]
    async fn test_list_tree() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/acme/skills/git/trees/main?recursive=1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"tree": [
                    {"path": "skills/react", "type": "tree"},
                    {"path": "skills/react/hooks/SKILL.md", "type": "blob"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = RegistryClient::with_bases(&server.url(), &server.url());
        let tree = client.list_tree("acme", "skills", "main").await;
        assert_eq!(tree.len(), 2);
        assert!(!tree[0].is_blob());
        assert!(tree[1].is_blob());
    }

    #[tokio::test]
    async fn test_list_tree_missing_ref_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let client = RegistryClient::with_bases(&server.url(), &server.url());
        let tree = client.list_tree("acme", "skills", "v9.9.9").await;
        assert!(tree.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_raw_absent_on_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let client = RegistryClient::with_bases(&server.url(), &server.url());
        let content = client.fetch_raw("acme", "skills", "main", "skills/metadata.json").await;
        assert!(content.is_none());
    }

    #[tokio::test]
    async fn test_fetch_raw() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/acme/skills/main/skills/react/hooks/SKILL.md")
            .with_status(200)
            .with_body("# Hooks\n")
            .create_async()
            .await;

        let client = RegistryClient::with_bases(&server.url(), &server.url());
        let content = client
            .fetch_raw("acme", "skills", "main", "skills/react/hooks/SKILL.md")
            .await;
        assert_eq!(content.as_deref(), Some("# Hooks\n"));
    }
}
