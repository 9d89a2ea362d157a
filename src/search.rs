use anyhow::{Context, Result};

use crate::query::tokens::{join_query, repo_token_value, without_repo_tokens};

mod github;
mod http_client;
mod types;

pub use self::github::GithubSearch;
pub use self::types::Row;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    PullRequests,
    Issues,
}

impl SectionKind {
    /// Search qualifier restricting results to this kind.
    pub fn qualifier(self) -> &'static str {
        match self {
            SectionKind::PullRequests => "is:pr",
            SectionKind::Issues => "is:issue",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SectionKind::PullRequests => "prs",
            SectionKind::Issues => "issues",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            SectionKind::PullRequests => "pull requests",
            SectionKind::Issues => "issues",
        }
    }
}

/// Turns a resolved query into rows.
pub trait SearchClient {
    fn search(&self, kind: SectionKind, query: &str, limit: u32) -> Result<Vec<Row>>;
}

/// `query` with the kind qualifier added, keeping a leading `repo:` token
/// in front.
pub fn qualified_query(kind: SectionKind, query: &str) -> String {
    let rest = without_repo_tokens(query);
    join_query(
        repo_token_value(query),
        std::iter::once(kind.qualifier()).chain(rest),
    )
}

pub(crate) fn api_token_from_env() -> Option<String> {
    ["GH_TOKEN", "GITHUB_TOKEN"]
        .iter()
        .filter_map(|k| std::env::var(k).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

pub(crate) fn repo_from_api_url(repository_url: &str) -> Result<String> {
    let mut parts = repository_url.trim_end_matches('/').rsplit('/');
    let name = parts.next().filter(|s| !s.is_empty());
    let owner = parts.next().filter(|s| !s.is_empty());
    match (owner, name) {
        (Some(owner), Some(name)) => Ok(format!("{}/{}", owner, name)),
        _ => anyhow::bail!("unexpected repository url {:?}", repository_url),
    }
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
