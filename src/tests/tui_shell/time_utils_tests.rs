use super::*;

fn now() -> OffsetDateTime {
    OffsetDateTime::parse("2026-03-10T12:00:00Z", &Rfc3339).unwrap()
}

#[test]
fn recent_updates_are_relative() {
    assert_eq!(fmt_updated("2026-03-10T11:59:30Z", now()), "just now");
    assert_eq!(fmt_updated("2026-03-10T11:15:00Z", now()), "45m ago");
    assert_eq!(fmt_updated("2026-03-09T10:00:00Z", now()), "26h ago");
    assert_eq!(fmt_updated("2026-03-03T12:00:00Z", now()), "7d ago");
}

#[test]
fn old_or_future_updates_are_absolute() {
    assert_eq!(fmt_updated("2025-12-01T08:30:00Z", now()), "2025-12-01 08:30Z");
    assert_eq!(fmt_updated("2026-03-11T00:00:00Z", now()), "2026-03-11 00:00Z");
}

#[test]
fn unparseable_timestamps_pass_through() {
    assert_eq!(fmt_updated("yesterday", now()), "yesterday");
}
