use super::*;
use crate::git::RepositoryIdentity;
use crate::query::ScopeTarget;
use time::format_description::well_known::Rfc3339;

fn id(slug: &str) -> RepositoryIdentity {
    let (owner, name) = slug.split_once('/').unwrap();
    RepositoryIdentity::new(owner, name).unwrap()
}

fn now() -> OffsetDateTime {
    OffsetDateTime::parse("2026-03-10T12:00:00Z", &Rfc3339).unwrap()
}

fn ctx(identities: &Identities) -> QueryContext<'_> {
    QueryContext {
        identities,
        config_pins_repo: false,
        now: now(),
    }
}

fn state(target: ScopeTarget) -> ScopeState {
    ScopeState {
        target,
        ..ScopeState::default()
    }
}

fn acme() -> Identities {
    Identities::new(Some(id("acme/widgets")), None)
}

fn fork() -> Identities {
    Identities::new(Some(id("me/widgets")), Some(id("acme/widgets")))
}

#[test]
fn origin_scope_prepends_repo_token() {
    let ids = acme();
    assert_eq!(
        compose("is:open author:@me", &state(ScopeTarget::Origin), &ctx(&ids)),
        "repo:acme/widgets is:open author:@me"
    );
}

#[test]
fn author_suppression_drops_only_author_me() {
    let ids = acme();
    let s = state(ScopeTarget::Origin).toggle_author_filter();
    assert_eq!(
        compose("is:open author:@me", &s, &ctx(&ids)),
        "repo:acme/widgets is:open"
    );
    assert_eq!(
        compose("author:@me", &state(ScopeTarget::None).toggle_author_filter(), &ctx(&ids)),
        ""
    );
}

#[test]
fn custom_filter_replaces_any_repo_token() {
    let ids = acme();
    let s = ScopeState::default().set_custom_filter("other/repo");
    assert_eq!(compose("is:open", &s, &ctx(&ids)), "repo:other/repo is:open");
    assert_eq!(
        compose("repo:c/d is:open", &s, &ctx(&ids)),
        "repo:other/repo is:open"
    );
    assert_eq!(compose("", &s, &ctx(&ids)), "repo:other/repo");
}

#[test]
fn configured_repo_wins_over_every_scope() {
    let ids = fork();
    let pinned = QueryContext {
        config_pins_repo: true,
        ..ctx(&ids)
    };
    for s in [
        state(ScopeTarget::Origin),
        state(ScopeTarget::Upstream),
        state(ScopeTarget::None),
        ScopeState::default().set_custom_filter("other/repo"),
    ] {
        assert_eq!(
            compose("repo:x/y is:open author:@me", &s, &pinned),
            "repo:x/y is:open author:@me"
        );
    }
    let s = state(ScopeTarget::Origin).toggle_author_filter();
    assert_eq!(compose("repo:x/y is:open author:@me", &s, &pinned), "repo:x/y is:open");
}

#[test]
fn typed_repo_token_is_a_manual_override() {
    let ids = acme();
    assert_eq!(
        compose("is:open repo:c/d", &state(ScopeTarget::Origin), &ctx(&ids)),
        "repo:c/d is:open"
    );
    assert_eq!(
        compose("repo:c/d is:open", &state(ScopeTarget::None), &ctx(&ids)),
        "repo:c/d is:open"
    );
}

#[test]
fn typed_token_matching_scope_is_rederived() {
    let ids = fork();
    assert_eq!(
        compose("repo:me/widgets  is:open", &state(ScopeTarget::Origin), &ctx(&ids)),
        "repo:me/widgets is:open"
    );
    assert_eq!(
        compose("is:open repo:acme/widgets", &state(ScopeTarget::Upstream), &ctx(&ids)),
        "repo:acme/widgets is:open"
    );
}

#[test]
fn upstream_scope_falls_back_to_origin() {
    let ids = acme();
    assert_eq!(
        compose("is:open", &state(ScopeTarget::Upstream), &ctx(&ids)),
        "repo:acme/widgets is:open"
    );
    let ids = fork();
    assert_eq!(
        compose("is:open", &state(ScopeTarget::Upstream), &ctx(&ids)),
        "repo:acme/widgets is:open"
    );
}

#[test]
fn no_identities_means_no_repo_token() {
    let ids = Identities::default();
    for target in [ScopeTarget::Origin, ScopeTarget::Upstream, ScopeTarget::None] {
        assert_eq!(compose("  is:open   label:bug ", &state(target), &ctx(&ids)), "is:open label:bug");
    }
}

#[test]
fn duplicate_repo_tokens_collapse() {
    let ids = acme();
    assert_eq!(
        compose(
            "repo:acme/widgets is:open repo:acme/widgets",
            &state(ScopeTarget::Origin),
            &ctx(&ids)
        ),
        "repo:acme/widgets is:open"
    );
    assert_eq!(
        compose("repo:c/d is:open repo:e/f", &state(ScopeTarget::Origin), &ctx(&ids)),
        "repo:c/d is:open"
    );
}

#[test]
fn author_toggle_never_touches_repo_token() {
    let ids = fork();
    for s in [
        state(ScopeTarget::Origin),
        state(ScopeTarget::Upstream),
        ScopeState::default().set_custom_filter("x/y"),
    ] {
        let on = compose("author:@me is:open", &s, &ctx(&ids));
        let off = compose("author:@me is:open", &s.clone().toggle_author_filter(), &ctx(&ids));
        assert_eq!(
            crate::query::tokens::repo_token_value(&on),
            crate::query::tokens::repo_token_value(&off)
        );
        assert!(on.contains("author:@me"));
        assert!(!off.contains("author:@me"));
    }
}

#[test]
fn templates_expand_before_scoping() {
    let ids = acme();
    assert_eq!(
        compose(
            r#"is:open updated:>={{ now_modify("-1w") }}"#,
            &state(ScopeTarget::Origin),
            &ctx(&ids)
        ),
        "repo:acme/widgets is:open updated:>=2026-03-03"
    );
}

#[test]
fn unexpanded_composition_keeps_templates() {
    let ids = acme();
    assert_eq!(
        compose_unexpanded(
            r#"is:open updated:>={{ now_modify("-1w") }}"#,
            &state(ScopeTarget::Origin),
            &ctx(&ids)
        ),
        r#"repo:acme/widgets is:open updated:>={{ now_modify("-1w") }}"#
    );
}

#[test]
fn edit_composition_keeps_suppressed_author() {
    let ids = acme();
    let s = state(ScopeTarget::Origin).toggle_author_filter();
    let raw = r#"is:open author:@me updated:>={{ now_modify("-1w") }}"#;
    assert_eq!(
        compose_for_edit(raw, &s, &ctx(&ids)),
        r#"repo:acme/widgets is:open author:@me updated:>={{ now_modify("-1w") }}"#
    );
    assert_eq!(
        compose_unexpanded(raw, &s, &ctx(&ids)),
        r#"repo:acme/widgets is:open updated:>={{ now_modify("-1w") }}"#
    );
}
