use super::http_client::{ensure_ok, with_retries};
use super::types::SearchResponse;
use super::*;

const MAX_PER_PAGE: u32 = 100;

pub struct GithubSearch {
    api_url: String,
    token: Option<String>,
    client: reqwest::blocking::Client,
}

impl GithubSearch {
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("scopedash")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    /// Client for `api_url` using `GH_TOKEN` / `GITHUB_TOKEN` when set.
    pub fn from_env(api_url: &str) -> Result<Self> {
        Self::new(api_url, api_token_from_env())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn fetch(&self, q: &str, per_page: u32) -> Result<SearchResponse> {
        let mut req = self
            .client
            .get(self.url("/search/issues"))
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .query(&[
                ("q", q.to_string()),
                ("per_page", per_page.to_string()),
                ("sort", "updated".to_string()),
            ]);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().context("search request")?;
        ensure_ok(resp, "search")?
            .json()
            .context("parse search response")
    }
}

impl SearchClient for GithubSearch {
    fn search(&self, kind: SectionKind, query: &str, limit: u32) -> Result<Vec<Row>> {
        let q = qualified_query(kind, query);
        let per_page = limit.clamp(1, MAX_PER_PAGE);
        tracing::info!(kind = kind.label(), query = %q, "searching");

        let resp = with_retries("search", || self.fetch(&q, per_page))?;
        tracing::debug!(total = resp.total_count, returned = resp.items.len(), "search done");

        resp.items
            .into_iter()
            .map(|item| {
                Ok(Row {
                    number: item.number,
                    title: item.title,
                    repo: repo_from_api_url(&item.repository_url)?,
                    author: item.user.map(|u| u.login).unwrap_or_default(),
                    updated_at: item.updated_at,
                    url: item.html_url,
                })
            })
            .collect()
    }
}
