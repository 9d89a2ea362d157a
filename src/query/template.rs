use std::sync::OnceLock;

use minijinja::{Environment, Error, ErrorKind, UndefinedBehavior};
use serde::Serialize;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

const MAX_OFFSET_UNITS: i64 = 1_000_000;

#[derive(Serialize)]
struct TemplateVars {
    now: String,
}

fn day_format() -> &'static [FormatItem<'static>] {
    static FMT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse("[year]-[month padding:zero]-[day padding:zero]")
            .expect("valid time format")
    })
}

/// Expand `{{ ... }}` expressions in a raw query against `now`.
///
/// Available: `now` (RFC 3339), `now_modify("-3d")` (also `nowModify`),
/// and the `date` filter. The helper may also be written without
/// parentheses, `{{ nowModify "-3d" }}`. Malformed templates leave the text
/// untouched.
pub fn expand(raw: &str, now: OffsetDateTime) -> String {
    if !looks_templated(raw) {
        return raw.to_string();
    }
    match render(raw, now) {
        Ok(out) => out,
        Err(err) => {
            tracing::warn!(
                error = %err,
                query = raw,
                hint = r#"helpers are called as now_modify("-3d")"#,
                "query template failed; searching raw text"
            );
            raw.to_string()
        }
    }
}

fn looks_templated(raw: &str) -> bool {
    raw.contains("{{") || raw.contains("{%") || raw.contains("{#")
}

fn render(raw: &str, now: OffsetDateTime) -> Result<String, Error> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_function("now_modify", move |offset: String| now_modify(now, &offset));
    env.add_function("nowModify", move |offset: String| now_modify(now, &offset));
    env.add_filter("date", date);

    let now = now
        .format(&Rfc3339)
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, format!("format now: {e}")))?;
    env.render_str(&call_syntax(raw), TemplateVars { now })
}

/// Rewrite `{{ nowModify "-2w" }}` into `{{ nowModify("-2w") }}`. Any other
/// expression is left as written.
fn call_syntax(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find("{{") {
        let body = &rest[start + 2..];
        let Some(end) = body.find("}}") else {
            break;
        };
        out.push_str(&rest[..start]);
        match bare_call(body[..end].trim()) {
            Some((name, arg)) => {
                out.push_str("{{ ");
                out.push_str(name);
                out.push('(');
                out.push_str(arg);
                out.push_str(") }}");
            }
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &body[end + 2..];
    }
    out.push_str(rest);
    out
}

fn bare_call(expr: &str) -> Option<(&str, &str)> {
    let (name, arg) = expr.split_once(char::is_whitespace)?;
    if !matches!(name, "now_modify" | "nowModify") {
        return None;
    }
    let arg = arg.trim();
    let quote = arg.chars().next().filter(|c| matches!(c, '"' | '\''))?;
    let inner = arg.strip_prefix(quote)?.strip_suffix(quote)?;
    (!inner.contains(quote)).then_some((name, arg))
}

fn now_modify(now: OffsetDateTime, offset: &str) -> Result<String, Error> {
    let delta = parse_offset(offset).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("bad offset {offset:?} (expected e.g. -3d, 2w, -12h)"),
        )
    })?;
    let at = now
        .checked_add(delta)
        .ok_or_else(|| Error::new(ErrorKind::InvalidOperation, "offset out of range"))?;
    at.format(day_format())
        .map_err(|e| Error::new(ErrorKind::InvalidOperation, format!("format date: {e}")))
}

fn date(value: String, format: Option<String>) -> Result<String, Error> {
    let at = OffsetDateTime::parse(&value, &Rfc3339).map_err(|e| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("not an RFC 3339 timestamp {value:?}: {e}"),
        )
    })?;
    let out = match format {
        None => at.format(day_format()),
        Some(fmt) => {
            let items = time::format_description::parse(&fmt).map_err(|e| {
                Error::new(
                    ErrorKind::InvalidOperation,
                    format!("bad date format {fmt:?}: {e}"),
                )
            })?;
            at.format(items.as_slice())
        }
    };
    out.map_err(|e| Error::new(ErrorKind::InvalidOperation, format!("format date: {e}")))
}

/// `[+-]<n><unit>` with unit one of s, m, h, d, w.
fn parse_offset(s: &str) -> Option<Duration> {
    let s = s.trim();
    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let split = rest.find(|c: char| !c.is_ascii_digit())?;
    let (digits, unit) = rest.split_at(split);
    let n: i64 = digits.parse().ok()?;
    if n > MAX_OFFSET_UNITS {
        return None;
    }
    let n = if negative { -n } else { n };
    match unit {
        "s" => Some(Duration::seconds(n)),
        "m" => Some(Duration::minutes(n)),
        "h" => Some(Duration::hours(n)),
        "d" => Some(Duration::days(n)),
        "w" => Some(Duration::weeks(n)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../tests/query/template_tests.rs"]
mod tests;
