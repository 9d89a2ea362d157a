//! Search API payloads and the row shape the dashboard table shows.

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub number: u64,
    pub title: String,
    pub repo: String,
    pub author: String,
    pub updated_at: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchResponse {
    #[serde(default)]
    pub(super) total_count: u64,
    #[serde(default)]
    pub(super) items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchItem {
    pub(super) number: u64,
    pub(super) title: String,
    pub(super) html_url: String,
    pub(super) repository_url: String,
    pub(super) updated_at: String,
    #[serde(default)]
    pub(super) user: Option<SearchUser>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchUser {
    pub(super) login: String,
}
