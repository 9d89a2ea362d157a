use super::*;

fn at(ts: &str) -> OffsetDateTime {
    OffsetDateTime::parse(ts, &Rfc3339).unwrap()
}

#[test]
fn plain_text_passes_through() {
    let now = at("2026-03-10T12:00:00Z");
    assert_eq!(expand("is:open author:@me", now), "is:open author:@me");
    assert_eq!(expand("", now), "");
}

#[test]
fn relative_dates_follow_now() {
    let now = at("2026-03-10T12:00:00Z");
    assert_eq!(
        expand(r#"is:open updated:>={{ now_modify("-3d") }}"#, now),
        "is:open updated:>=2026-03-07"
    );
    assert_eq!(
        expand(r#"created:<{{ nowModify("-2w") }}"#, now),
        "created:<2026-02-24"
    );
    assert_eq!(expand(r#"{{ now_modify("+1d") }}"#, now), "2026-03-11");

    let later = at("2026-04-01T00:30:00Z");
    assert_eq!(expand(r#"{{ now_modify("-1h") }}"#, later), "2026-03-31");
}

#[test]
fn now_variable_and_date_filter() {
    let now = at("2026-03-10T12:00:00Z");
    assert_eq!(expand("{{ now }}", now), "2026-03-10T12:00:00Z");
    assert_eq!(expand(r#"{{ now | date("[year]") }}"#, now), "2026");
    assert_eq!(expand("{{ now | date }}", now), "2026-03-10");
}

#[test]
fn broken_templates_fall_back_to_raw_text() {
    let now = at("2026-03-10T12:00:00Z");
    for raw in [
        "is:open {{ now_modify( }}",
        "is:open {{ nope }}",
        r#"is:open {{ now_modify("soon") }}"#,
        r#"{{ "x" | date }}"#,
        "{% if %}",
    ] {
        assert_eq!(expand(raw, now), raw);
    }
}

#[test]
fn offsets_parse_sign_and_unit() {
    assert_eq!(parse_offset("-3d"), Some(Duration::days(-3)));
    assert_eq!(parse_offset("2w"), Some(Duration::weeks(2)));
    assert_eq!(parse_offset("+90m"), Some(Duration::minutes(90)));
    assert_eq!(parse_offset("10s"), Some(Duration::seconds(10)));
    assert_eq!(parse_offset("3"), None);
    assert_eq!(parse_offset("d"), None);
    assert_eq!(parse_offset("3y"), None);
    assert_eq!(parse_offset("99999999999d"), None);
}

#[test]
fn helper_accepts_space_separated_argument() {
    let now = at("2026-03-10T12:00:00Z");
    assert_eq!(
        expand(r#"is:open created:<{{ nowModify "-2w" }}"#, now),
        "is:open created:<2026-02-24"
    );
    assert_eq!(expand("{{ now_modify '-3d' }}", now), "2026-03-07");
    assert_eq!(
        expand(r#"{{ now }} {{ nowModify "+1d" }}"#, now),
        "2026-03-10T12:00:00Z 2026-03-11"
    );

    let bad = r#"is:open {{ nowModify "soon" }}"#;
    assert_eq!(expand(bad, now), bad);
}
