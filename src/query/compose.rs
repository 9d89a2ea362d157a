use time::OffsetDateTime;

use super::tokens::{join_query, normalize, repo_token_value, strip_author_me, without_repo_tokens};
use super::{Identities, ScopeState, expand};

/// Inputs to composition that come from outside the scope state.
#[derive(Clone, Copy, Debug)]
pub struct QueryContext<'a> {
    pub identities: &'a Identities,
    /// The configured base filter already carries a `repo:` token.
    pub config_pins_repo: bool,
    pub now: OffsetDateTime,
}

/// Build the query sent to the search backend from the raw text and scope
/// state. Never fails; the `repo:` token, if any, always comes first.
pub fn compose(raw: &str, state: &ScopeState, ctx: &QueryContext<'_>) -> String {
    finish(&expand(raw, ctx.now), state, ctx, state.author_filter_removed)
}

/// Same scoping as [`compose`] but with template expressions left in place,
/// for showing the query back to the user.
pub fn compose_unexpanded(raw: &str, state: &ScopeState, ctx: &QueryContext<'_>) -> String {
    finish(raw, state, ctx, state.author_filter_removed)
}

/// Text to pre-fill the search input with. Scoped, templates unexpanded,
/// and `author:@me` kept even while suppressed: committing it unchanged
/// must leave the author toggle reversible.
pub fn compose_for_edit(raw: &str, state: &ScopeState, ctx: &QueryContext<'_>) -> String {
    finish(raw, state, ctx, false)
}

fn finish(text: &str, state: &ScopeState, ctx: &QueryContext<'_>, strip_author: bool) -> String {
    let scoped = apply_scope(text, state, ctx);
    if strip_author {
        normalize(&strip_author_me(&scoped))
    } else {
        normalize(&scoped)
    }
}

fn apply_scope(expanded: &str, state: &ScopeState, ctx: &QueryContext<'_>) -> String {
    if ctx.config_pins_repo {
        return expanded.to_string();
    }

    if state.has_custom_filter() {
        return join_query(
            Some(state.custom_repo_filter.as_str()),
            without_repo_tokens(expanded),
        );
    }

    let auto = ctx.identities.scoped(state.target).map(|id| id.slug());

    // A typed repo: token that differs from what scoping would produce wins.
    if let Some(typed) = repo_token_value(expanded)
        && Some(typed) != auto.as_deref()
    {
        return expanded.to_string();
    }

    join_query(auto.as_deref(), without_repo_tokens(expanded))
}

#[cfg(test)]
#[path = "../tests/query/compose_tests.rs"]
mod tests;
