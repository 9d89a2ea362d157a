//! One dashboard section: a configured view, the text the user has typed
//! into its search bar, its scope state and the rows last fetched for it.
//!
//! Sections never cache remote identities; every operation that needs them
//! takes the freshly resolved [`Identities`] from the caller.

use anyhow::Result;
use time::OffsetDateTime;

use crate::config::SectionConfig;
use crate::query::tokens::{join_query, repo_token_value, strip_repo_tokens};
use crate::query::{
    Identities, QueryContext, ScopeState, compose, compose_for_edit, compose_unexpanded,
    sync_from_text,
};
use crate::search::{Row, SearchClient, SectionKind};

pub const DEFAULT_LIMIT: u32 = 20;

/// An entry in the repository picker. An empty `value` means all
/// repositories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug)]
pub struct Section {
    pub id: usize,
    pub kind: SectionKind,
    config: SectionConfig,
    smart_filtering: bool,
    search_value: String,
    scope: ScopeState,
    pub rows: Vec<Row>,
    pub cursor: usize,
    pub last_error: Option<String>,
    pub fetched_at: Option<OffsetDateTime>,
}

impl Section {
    pub fn new(
        id: usize,
        kind: SectionKind,
        config: SectionConfig,
        smart_filtering: bool,
        identities: &Identities,
    ) -> Self {
        let scope = ScopeState::at_launch(smart_filtering, &config.filters, identities);
        let search_value = launch_text(&config, &scope, identities);
        Self {
            id,
            kind,
            config,
            smart_filtering,
            search_value,
            scope,
            rows: Vec::new(),
            cursor: 0,
            last_error: None,
            fetched_at: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.config.title
    }

    pub fn config(&self) -> &SectionConfig {
        &self.config
    }

    pub fn limit(&self) -> u32 {
        self.config.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Raw search bar text as last committed.
    pub fn search_value(&self) -> &str {
        &self.search_value
    }

    pub fn scope(&self) -> &ScopeState {
        &self.scope
    }

    fn context<'a>(&self, identities: &'a Identities, now: OffsetDateTime) -> QueryContext<'a> {
        QueryContext {
            identities,
            config_pins_repo: self.config.pins_repo(),
            now,
        }
    }

    pub fn effective_query(&self, identities: &Identities) -> String {
        self.effective_query_at(identities, OffsetDateTime::now_utc())
    }

    pub fn effective_query_at(&self, identities: &Identities, now: OffsetDateTime) -> String {
        compose(&self.search_value, &self.scope, &self.context(identities, now))
    }

    /// What the search bar shows: scoped like the effective query,
    /// templates left unexpanded.
    pub fn display_query(&self, identities: &Identities) -> String {
        compose_unexpanded(
            &self.search_value,
            &self.scope,
            &self.context(identities, OffsetDateTime::now_utc()),
        )
    }

    /// What the search input is pre-filled with. Unlike
    /// [`Section::display_query`] a suppressed `author:@me` is kept.
    pub fn edit_query(&self, identities: &Identities) -> String {
        compose_for_edit(
            &self.search_value,
            &self.scope,
            &self.context(identities, OffsetDateTime::now_utc()),
        )
    }

    pub fn scope_label(&self, identities: &Identities) -> String {
        self.scope.label(identities)
    }

    pub fn toggle_scope(&mut self, identities: &Identities) {
        let pinned = self.config.pins_repo();
        let next = self
            .scope
            .clone()
            .toggle_scope(pinned, identities.has_upstream());
        self.apply_scope(next);
    }

    pub fn toggle_author_filter(&mut self) {
        self.scope = self.scope.clone().toggle_author_filter();
    }

    pub fn set_custom_filter(&mut self, value: &str) {
        let next = self.scope.clone().set_custom_filter(value.trim());
        self.apply_scope(next);
    }

    pub fn select_repo(&mut self, value: &str, is_custom: bool, identities: &Identities) {
        let next = self
            .scope
            .clone()
            .select_from_picker(value.trim(), is_custom, identities);
        self.apply_scope(next);
    }

    /// Store text the user edited and infer scope state from it.
    pub fn commit_search(&mut self, text: &str, identities: &Identities) {
        self.search_value = text.trim().to_string();
        self.scope = sync_from_text(&self.search_value, &self.scope, identities);
        tracing::debug!(
            section = self.id,
            target = self.scope.target.label(),
            custom = %self.scope.custom_repo_filter,
            "search committed"
        );
    }

    /// Back to the configured filter and launch scope.
    pub fn reset_filters(&mut self, identities: &Identities) {
        self.scope = ScopeState::at_launch(self.smart_filtering, &self.config.filters, identities);
        self.search_value = launch_text(&self.config, &self.scope, identities);
    }

    /// Origin, upstream (when it resolves) and all repositories.
    pub fn picker_options(&self, identities: &Identities) -> Vec<RepoOption> {
        let mut opts = Vec::with_capacity(3);
        if let Some(origin) = &identities.origin {
            opts.push(RepoOption {
                label: format!("Origin: {}", origin),
                value: origin.slug(),
            });
        }
        if let Some(upstream) = &identities.upstream {
            opts.push(RepoOption {
                label: format!("Upstream: {}", upstream),
                value: upstream.slug(),
            });
        }
        opts.push(RepoOption {
            label: "All Repositories".to_string(),
            value: String::new(),
        });
        opts
    }

    /// The `repo:` value the search bar shows, or empty. The picker opens
    /// with this entry selected.
    pub fn current_repo_filter(&self, identities: &Identities) -> String {
        repo_token_value(&self.display_query(identities))
            .unwrap_or_default()
            .to_string()
    }

    /// Refetch rows for the current effective query. On failure the old
    /// rows stay and the error is kept for the status line.
    pub fn refresh(&mut self, client: &dyn SearchClient, identities: &Identities) -> Result<usize> {
        let query = self.effective_query(identities);
        match client.search(self.kind, &query, self.limit()) {
            Ok(rows) => {
                self.rows = rows;
                self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
                self.last_error = None;
                self.fetched_at = Some(OffsetDateTime::now_utc());
                Ok(self.rows.len())
            }
            Err(err) => {
                self.last_error = Some(format!("{:#}", err));
                Err(err)
            }
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
        }
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.cursor)
    }

    // The raw text drops its repo: tokens on every scope change so the
    // composer derives the token from state again. A configured repo is
    // part of the base filter and stays.
    fn apply_scope(&mut self, next: ScopeState) {
        if next != self.scope && !self.config.pins_repo() {
            self.search_value = strip_repo_tokens(&self.search_value);
        }
        self.scope = next;
    }
}

fn launch_text(config: &SectionConfig, scope: &ScopeState, identities: &Identities) -> String {
    match scope.repo_filter(identities) {
        Some(repo) if !config.pins_repo() => {
            join_query(Some(repo.as_str()), config.filters.split_whitespace())
        }
        _ => config.filters.trim().to_string(),
    }
}

#[cfg(test)]
#[path = "tests/section_tests.rs"]
mod tests;
