use std::path::Path;

use crate::git::{ORIGIN, RemoteLookup, RepositoryIdentity, UPSTREAM, parse_remote_url};

use super::ScopeTarget;

/// Repositories the working copy's `origin` and `upstream` remotes point at.
/// Either may be absent; absence only means that scope is unavailable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Identities {
    pub origin: Option<RepositoryIdentity>,
    pub upstream: Option<RepositoryIdentity>,
}

impl Identities {
    pub fn new(origin: Option<RepositoryIdentity>, upstream: Option<RepositoryIdentity>) -> Self {
        Self { origin, upstream }
    }

    /// Look both remotes up again. Nothing is cached between calls.
    pub fn resolve(lookup: &dyn RemoteLookup, dir: &Path) -> Self {
        Self {
            origin: resolve_remote(lookup, dir, ORIGIN),
            upstream: resolve_remote(lookup, dir, UPSTREAM),
        }
    }

    pub fn has_upstream(&self) -> bool {
        self.upstream.is_some()
    }

    /// Identity auto-scoping applies for `target`. An unresolvable upstream
    /// falls back to origin.
    pub fn scoped(&self, target: ScopeTarget) -> Option<&RepositoryIdentity> {
        match target {
            ScopeTarget::Origin => self.origin.as_ref(),
            ScopeTarget::Upstream => self.upstream.as_ref().or(self.origin.as_ref()),
            ScopeTarget::None => None,
        }
    }

    /// Which remote, if any, `value` (`owner/name`) names. Origin wins ties.
    pub fn target_for(&self, value: &str) -> Option<ScopeTarget> {
        if self.origin.as_ref().is_some_and(|id| id.slug() == value) {
            return Some(ScopeTarget::Origin);
        }
        if self.upstream.as_ref().is_some_and(|id| id.slug() == value) {
            return Some(ScopeTarget::Upstream);
        }
        None
    }
}

fn resolve_remote(lookup: &dyn RemoteLookup, dir: &Path, name: &str) -> Option<RepositoryIdentity> {
    let url = match lookup.find_remote_url(dir, name) {
        Ok(url) => url,
        Err(err) => {
            tracing::debug!(remote = name, dir = %dir.display(), error = %err, "remote lookup failed");
            return None;
        }
    };
    match parse_remote_url(&url) {
        Ok(id) => Some(id),
        Err(err) => {
            tracing::debug!(remote = name, url = %url, error = %err, "remote url not usable for scoping");
            None
        }
    }
}
