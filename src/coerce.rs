//! Best-effort coercions between scalar kinds.
//!
//! Every function here is total: failure is represented by
//! `Primary::Null`, never by an error, so three-valued logic can carry
//! an "unconvertible" outcome through predicate evaluation instead of
//! aborting a query. Strings are only attempted as numbers when they
//! pass the [`maybe_number`] sniffer, and only as datetimes when the
//! positional heuristics of [`str_to_time`] recognize their shape.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use lazy_static::lazy_static;
use regex::Regex;

use crate::dtformat::DatetimeFormatMap;
use crate::ternary::Ternary;
use crate::value::{parse_bool_literal, Primary};

lazy_static! {
    // optional sign, digits only
    static ref INTEGER_PATTERN: Regex = Regex::new(r"^[+-]?[0-9]+$").unwrap();
    // at most one non-trailing decimal point, at most one exponent with
    // a mandatory explicit sign
    static ref NUMBER_PATTERN: Regex =
        Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?([eE][+-][0-9]+)?$").unwrap();
}

/// Everything datetime parsing depends on: caller-supplied formats, the
/// location naive timestamps are interpreted in, and the shared
/// format-translation cache.
#[derive(Debug, Clone)]
pub struct DatetimeContext {
    pub formats: Vec<String>,
    pub location: FixedOffset,
    pub cache: Arc<DatetimeFormatMap>,
}

impl DatetimeContext {
    pub fn new(
        formats: Vec<String>,
        location: FixedOffset,
        cache: Arc<DatetimeFormatMap>,
    ) -> DatetimeContext {
        DatetimeContext {
            formats,
            location,
            cache,
        }
    }
}

impl Default for DatetimeContext {
    fn default() -> DatetimeContext {
        DatetimeContext {
            formats: Vec::new(),
            location: FixedOffset::east_opt(0).unwrap(),
            cache: Arc::new(DatetimeFormatMap::new()),
        }
    }
}

/// Does the string look like an integer literal?
pub fn maybe_integer(s: &str) -> bool {
    INTEGER_PATTERN.is_match(s)
}

/// Does the string look like a numeric literal?
pub fn maybe_number(s: &str) -> bool {
    NUMBER_PATTERN.is_match(s)
}

pub fn to_integer(p: &Primary) -> Primary {
    match p {
        Primary::Integer(_) => p.clone(),
        Primary::Float(f) => {
            if f.fract() == 0.0 {
                Primary::Integer(*f as i64)
            } else {
                Primary::Null
            }
        }
        Primary::String(s) => {
            let s = s.trim();
            if maybe_number(s) {
                if let Ok(i) = s.parse::<i64>() {
                    return Primary::Integer(i);
                }
                if let Ok(f) = s.parse::<f64>() {
                    if f.fract() == 0.0 {
                        return Primary::Integer(f as i64);
                    }
                }
            }
            Primary::Null
        }
        _ => Primary::Null,
    }
}

pub fn to_float(p: &Primary) -> Primary {
    match p {
        Primary::Integer(i) => Primary::Float(*i as f64),
        Primary::Float(_) => p.clone(),
        Primary::String(s) => {
            let s = s.trim();
            if maybe_number(s) {
                if let Ok(f) = s.parse::<f64>() {
                    return Primary::Float(f);
                }
            }
            Primary::Null
        }
        _ => Primary::Null,
    }
}

pub fn to_datetime(p: &Primary, ctx: &DatetimeContext) -> Primary {
    match p {
        Primary::Datetime(_) => p.clone(),
        Primary::String(s) => match str_to_time(s, ctx) {
            Some(t) => Primary::Datetime(t),
            None => Primary::Null,
        },
        _ => Primary::Null,
    }
}

pub fn to_boolean(p: &Primary) -> Primary {
    match p {
        Primary::Boolean(_) => p.clone(),
        Primary::Integer(_) | Primary::Float(_) | Primary::Ternary(_) => {
            match p.ternary() {
                Ternary::Unknown => Primary::Null,
                t => Primary::Boolean(t.as_bool()),
            }
        }
        Primary::String(s) => match parse_bool_literal(s.trim()) {
            Some(b) => Primary::Boolean(b),
            None => Primary::Null,
        },
        _ => Primary::Null,
    }
}

pub fn to_string(p: &Primary) -> Primary {
    match p {
        Primary::String(_) => p.clone(),
        Primary::Integer(i) => Primary::String(i.to_string()),
        Primary::Float(f) => Primary::String(f.to_string()),
        // no implicit datetime-to-string coercion
        _ => Primary::Null,
    }
}

/// Parse a datetime string: caller-supplied formats first, then the
/// positional heuristics keyed off the fifth character, then
/// RFC-822-style fallbacks.
///
/// The positional checks (`s[4]`, the length cuts at 8 and 10, the
/// offset probe at `len - 6`) intentionally reproduce the established
/// behavior of the engine, including its blind spots for unusual but
/// valid inputs; downstream code asserts on these exact boundaries.
pub fn str_to_time(s: &str, ctx: &DatetimeContext) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    for format in &ctx.formats {
        let layout = ctx.cache.get(format);
        if let Some(t) = parse_with_layout(s, &layout, &ctx.location) {
            return Some(t);
        }
    }

    let b = s.as_bytes();
    if b.len() < 8 || !b[0].is_ascii_digit() {
        return None;
    }

    match b[4] {
        b'-' => {
            if b.len() <= 10 {
                parse_naive_in(s, "%Y-%m-%d", &ctx.location)
            } else if b[10] == b'T' {
                if b[b.len() - 6] == b'+' || b[b.len() - 6] == b'-' || b[b.len() - 1] == b'Z' {
                    DateTime::parse_from_rfc3339(s).ok()
                } else {
                    parse_naive_in(s, "%Y-%m-%dT%H:%M:%S%.f", &ctx.location)
                }
            } else {
                parse_naive_in(s, "%Y-%m-%d %H:%M:%S%.f", &ctx.location)
                    .or_else(|| DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f %:z").ok())
                    .or_else(|| DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f %z").ok())
                    .or_else(|| parse_with_named_zone(s, "%Y-%m-%d %H:%M:%S%.f"))
            }
        }
        b'/' => {
            if b.len() <= 10 {
                parse_naive_in(s, "%Y/%m/%d", &ctx.location)
            } else {
                parse_naive_in(s, "%Y/%m/%d %H:%M:%S%.f", &ctx.location)
                    .or_else(|| DateTime::parse_from_str(s, "%Y/%m/%d %H:%M:%S%.f %:z").ok())
                    .or_else(|| DateTime::parse_from_str(s, "%Y/%m/%d %H:%M:%S%.f %z").ok())
                    .or_else(|| parse_with_named_zone(s, "%Y/%m/%d %H:%M:%S%.f"))
            }
        }
        _ => parse_rfc822(s),
    }
}

fn parse_with_layout(s: &str, layout: &str, location: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_str(s, layout) {
        return Some(dt);
    }
    parse_naive_in(s, layout, location)
}

fn parse_naive_in(s: &str, layout: &str, location: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, layout) {
        return location.from_local_datetime(&ndt).single();
    }
    if let Ok(nd) = NaiveDate::parse_from_str(s, layout) {
        let ndt = nd.and_hms_opt(0, 0, 0)?;
        return location.from_local_datetime(&ndt).single();
    }
    None
}

/// `02 Jan 06 15:04 -0700` and the zone-name form with a resolvable
/// abbreviation.
fn parse_rfc822(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_str(s, "%d %b %y %H:%M %z") {
        return Some(dt);
    }
    parse_with_named_zone(s, "%d %b %y %H:%M")
}

// Only universal-time abbreviations resolve; anything else fails the
// datetime parse and the string stays a string.
fn parse_with_named_zone(s: &str, layout: &str) -> Option<DateTime<FixedOffset>> {
    let (head, zone) = s.rsplit_once(' ')?;
    if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let offset = match zone {
        "UTC" | "GMT" | "UT" | "Z" => FixedOffset::east_opt(0)?,
        _ => return None,
    };
    let ndt = NaiveDateTime::parse_from_str(head.trim_end(), layout).ok()?;
    offset.from_local_datetime(&ndt).single()
}
