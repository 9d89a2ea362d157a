//! Whitespace token surgery on query strings.

pub const REPO_PREFIX: &str = "repo:";
pub const AUTHOR_ME: &str = "author:@me";

pub fn is_repo_token(token: &str) -> bool {
    token.starts_with(REPO_PREFIX)
}

pub fn has_repo_token(query: &str) -> bool {
    query.split_whitespace().any(is_repo_token)
}

/// Value of the first `repo:` token, if any. `repo:` alone yields `""`.
pub fn repo_token_value(query: &str) -> Option<&str> {
    query
        .split_whitespace()
        .find(|t| is_repo_token(t))
        .map(|t| &t[REPO_PREFIX.len()..])
}

/// Tokens with every `repo:` token removed.
pub fn without_repo_tokens(query: &str) -> Vec<&str> {
    query
        .split_whitespace()
        .filter(|t| !is_repo_token(t))
        .collect()
}

pub fn strip_repo_tokens(query: &str) -> String {
    without_repo_tokens(query).join(" ")
}

pub fn strip_author_me(query: &str) -> String {
    query
        .split_whitespace()
        .filter(|t| *t != AUTHOR_ME)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical layout: `repo:<value>` first when present, then `rest`,
/// single spaces, nothing leading or trailing.
pub fn join_query<'a>(repo: Option<&str>, rest: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    if let Some(repo) = repo {
        out.push_str(REPO_PREFIX);
        out.push_str(repo);
    }
    for token in rest {
        if token.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}

/// Keep the first `repo:` token (moved to the front) and drop the others.
pub fn normalize(query: &str) -> String {
    join_query(repo_token_value(query), without_repo_tokens(query))
}

#[cfg(test)]
#[path = "../tests/query/tokens_tests.rs"]
mod tests;
