use super::tokens::repo_token_value;
use super::{Identities, ScopeState, ScopeTarget};

/// Infer scope state from query text the user edited directly.
///
/// A `repo:` token naming origin or upstream selects that target; any other
/// value becomes the custom filter; no token (or an empty one) clears
/// scoping. The author filter flag is left alone.
pub fn sync_from_text(raw: &str, state: &ScopeState, identities: &Identities) -> ScopeState {
    let mut next = state.clone();
    next.custom_repo_filter.clear();

    let Some(value) = repo_token_value(raw).filter(|v| !v.is_empty()) else {
        next.target = ScopeTarget::None;
        return next;
    };

    match identities.target_for(value) {
        Some(target) => next.target = target,
        None => {
            next.target = ScopeTarget::None;
            next.custom_repo_filter = value.to_string();
        }
    }
    next
}

#[cfg(test)]
#[path = "../tests/query/sync_tests.rs"]
mod tests;
