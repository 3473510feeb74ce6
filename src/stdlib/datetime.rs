//! `isoFormat`: renders an RFC 3339 instant in UTC with moment-style pattern tokens.

use super::{define, string_arg};
use crate::ast::Node;
use crate::callable::expect_at_least;
use crate::context::Context;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::value::Value;
use chrono::{DateTime, Datelike, Timelike, Utc};

pub fn register(scope: &mut Context) {
    define(scope, "isoFormat", &[], 2, iso_format);
}

// Earlier entries win, so every token precedes its own prefixes.
const TOKENS: [&str; 21] = [
    "Do", "YYYY", "YY", "MMMM", "MMM", "MM", "M", "DD", "D", "dddd", "ddd", "HH", "H", "hh", "h",
    "mm", "m", "ss", "s", "A", "a",
];

fn iso_format(interpreter: &Interpreter, arguments: &[Node]) -> Result<Value, RuntimeError> {
    expect_at_least("isoFormat", arguments, 2)?;
    let iso = string_arg(interpreter, arguments, 0)?;
    let pattern = string_arg(interpreter, arguments, 1)?;
    match (iso, pattern) {
        (Some(iso), Some(pattern)) => Ok(Value::from(format_iso(&iso, &pattern))),
        _ => Ok(Value::Null),
    }
}

/// `None` when either input is blank or the instant does not parse.
pub fn format_iso(iso: &str, pattern: &str) -> Option<String> {
    if iso.trim().is_empty() || pattern.trim().is_empty() {
        return None;
    }
    let instant = DateTime::parse_from_rfc3339(iso.trim()).ok()?;
    Some(render(&instant.with_timezone(&Utc), pattern))
}

/// Substitutes pattern tokens left to right. Text inside `[...]` is copied verbatim.
pub fn render(time: &DateTime<Utc>, pattern: &str) -> String {
    let mut out = String::new();
    let mut rest = pattern;
    while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(close) = rest.find(']') {
                out.push_str(&rest[1..close]);
                rest = &rest[close + 1..];
                continue;
            }
        }
        match TOKENS.iter().find(|token| rest.starts_with(*token)) {
            Some(token) => {
                out.push_str(&substitute(time, token));
                rest = &rest[token.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    out
}

fn substitute(time: &DateTime<Utc>, token: &str) -> String {
    let (pm, hour12) = time.hour12();
    match token {
        "Do" => format!("{}{}", time.day(), ordinal_suffix(time.day())),
        "YYYY" => format!("{:04}", time.year()),
        "YY" => format!("{:02}", time.year().rem_euclid(100)),
        "MMMM" => time.format("%B").to_string(),
        "MMM" => time.format("%b").to_string(),
        "MM" => format!("{:02}", time.month()),
        "M" => time.month().to_string(),
        "DD" => format!("{:02}", time.day()),
        "D" => time.day().to_string(),
        "dddd" => time.format("%A").to_string(),
        "ddd" => time.format("%a").to_string(),
        "HH" => format!("{:02}", time.hour()),
        "H" => time.hour().to_string(),
        "hh" => format!("{:02}", hour12),
        "h" => hour12.to_string(),
        "mm" => format!("{:02}", time.minute()),
        "m" => time.minute().to_string(),
        "ss" => format!("{:02}", time.second()),
        "s" => time.second().to_string(),
        "A" => String::from(if pm { "PM" } else { "AM" }),
        "a" => String::from(if pm { "pm" } else { "am" }),
        other => other.to_string(),
    }
}

/// 11, 12 and 13 take `th` regardless of their last digit.
pub fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod datetime_tests {
    use crate::context::Context;
    use crate::stdlib::datetime::{format_iso, ordinal_suffix};
    use crate::stdlib::{run, run_with};
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn ordinal_day_and_month_name() {
        assert_eq!(
            format_iso("2024-06-03T23:42:36Z", "Do MMMM").as_deref(),
            Some("3rd June")
        );
        assert_eq!(
            format_iso("2024-02-29T00:00:00Z", "Do MMMM").as_deref(),
            Some("29th February")
        );
    }

    #[test]
    fn ordinal_suffixes() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (31, "st"),
        ];
        for (day, suffix) in cases {
            assert_eq!(ordinal_suffix(day), suffix, "day {}", day);
        }
    }

    #[test]
    fn longest_tokens_match_first() {
        let iso = "2024-12-25T15:30:45Z";
        assert_eq!(format_iso(iso, "MMMM YYYY").as_deref(), Some("December 2024"));
        assert_eq!(format_iso(iso, "DD/MM/YY").as_deref(), Some("25/12/24"));
        assert_eq!(format_iso(iso, "D MMM").as_deref(), Some("25 Dec"));
        assert_eq!(format_iso(iso, "dddd, ddd").as_deref(), Some("Wednesday, Wed"));
    }

    #[test]
    fn time_tokens() {
        let iso = "2024-12-25T15:03:07Z";
        assert_eq!(format_iso(iso, "HH:mm:ss").as_deref(), Some("15:03:07"));
        assert_eq!(format_iso(iso, "h:m:s a").as_deref(), Some("3:3:7 pm"));
        assert_eq!(format_iso(iso, "hh A").as_deref(), Some("03 PM"));
    }

    #[test]
    fn offsets_are_converted_to_utc() {
        assert_eq!(
            format_iso("2024-01-01T02:00:00+05:30", "Do MMMM HH:mm").as_deref(),
            Some("31st December 20:30")
        );
    }

    #[test]
    fn bracketed_text_is_literal() {
        assert_eq!(
            format_iso("2024-05-23T00:00:00Z", "[Day] D").as_deref(),
            Some("Day 23")
        );
    }

    #[test]
    fn bad_input_is_null() {
        assert_eq!(format_iso("", "YYYY"), None);
        assert_eq!(format_iso("yesterday", "YYYY"), None);
        assert_eq!(format_iso("2024-05-23T00:00:00Z", "  "), None);
        assert_eq!(run("isoFormat('nope', 'YYYY')").unwrap(), Value::Null);
    }

    #[test]
    fn builtin_reads_context() {
        let context = Context::new("test").with("isoDate", "2024-06-11T00:00:00Z");
        assert_eq!(
            run_with("isoFormat(isoDate, 'Do MMMM')", &context).unwrap(),
            Value::from("11th June")
        );
        assert!(run("isoFormat('2024-06-11T00:00:00Z')").is_err());
    }
}
