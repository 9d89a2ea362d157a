use super::Identities;
use super::tokens::has_repo_token;

/// Which remote's repository, if any, is auto-applied as the `repo:` token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScopeTarget {
    Origin,
    Upstream,
    #[default]
    None,
}

impl ScopeTarget {
    pub fn label(self) -> &'static str {
        match self {
            ScopeTarget::Origin => "origin",
            ScopeTarget::Upstream => "upstream",
            ScopeTarget::None => "all",
        }
    }
}

/// How repository scoping is applied to a section's query.
///
/// A non-empty `custom_repo_filter` overrides `target` whenever it is set;
/// toggling scope moves `target` underneath it. `author_filter_removed` is
/// an independent axis.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScopeState {
    pub target: ScopeTarget,
    pub custom_repo_filter: String,
    pub author_filter_removed: bool,
}

impl ScopeState {
    /// Origin scoping when smart filtering is on, origin resolves and the
    /// configured filter doesn't already name a repo.
    pub fn at_launch(smart_filtering: bool, base_filter: &str, identities: &Identities) -> Self {
        let target = if smart_filtering && identities.origin.is_some() && !has_repo_token(base_filter)
        {
            ScopeTarget::Origin
        } else {
            ScopeTarget::None
        };
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn has_custom_filter(&self) -> bool {
        !self.custom_repo_filter.is_empty()
    }

    /// Cycle Origin -> Upstream -> None -> Origin, skipping Upstream when no
    /// upstream remote exists. A repo pinned by configuration freezes scope.
    pub fn toggle_scope(mut self, config_pins_repo: bool, has_upstream: bool) -> Self {
        if config_pins_repo {
            return self;
        }
        self.target = match self.target {
            ScopeTarget::Origin if has_upstream => ScopeTarget::Upstream,
            ScopeTarget::Origin => ScopeTarget::None,
            ScopeTarget::Upstream => ScopeTarget::None,
            ScopeTarget::None => ScopeTarget::Origin,
        };
        self
    }

    pub fn set_custom_filter(mut self, value: &str) -> Self {
        self.custom_repo_filter = value.to_string();
        if !value.is_empty() {
            self.target = ScopeTarget::None;
        }
        self
    }

    /// Apply a repo picker selection. An empty value means all
    /// repositories; a value naming origin or upstream selects that target.
    pub fn select_from_picker(mut self, value: &str, is_custom: bool, identities: &Identities) -> Self {
        if value.is_empty() {
            self.custom_repo_filter.clear();
            self.target = ScopeTarget::None;
            return self;
        }
        if let Some(target) = identities.target_for(value) {
            self.custom_repo_filter.clear();
            self.target = target;
            return self;
        }
        tracing::debug!(repo = value, is_custom, "custom repo filter selected");
        self.custom_repo_filter = value.to_string();
        self.target = ScopeTarget::None;
        self
    }

    pub fn toggle_author_filter(mut self) -> Self {
        self.author_filter_removed = !self.author_filter_removed;
        self
    }

    /// The repo value currently in effect, as `owner/name`.
    pub fn repo_filter(&self, identities: &Identities) -> Option<String> {
        if self.has_custom_filter() {
            return Some(self.custom_repo_filter.clone());
        }
        let id = match self.target {
            ScopeTarget::Origin => identities.origin.as_ref(),
            ScopeTarget::Upstream => identities.upstream.as_ref(),
            ScopeTarget::None => None,
        };
        id.map(|id| id.slug())
    }

    /// Status line label. An unresolvable target shows its literal name
    /// even when the query falls back to origin.
    pub fn label(&self, identities: &Identities) -> String {
        self.repo_filter(identities)
            .unwrap_or_else(|| self.target.label().to_string())
    }
}

#[cfg(test)]
#[path = "../tests/query/scope_tests.rs"]
mod tests;
