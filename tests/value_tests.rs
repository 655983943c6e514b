// tests/value_tests.rs

use chrono::{FixedOffset, TimeZone};
use csvql::coerce::{
    maybe_integer, maybe_number, str_to_time, to_boolean, to_datetime, to_float, to_integer,
    to_string, DatetimeContext,
};
use csvql::ternary::Ternary;
use csvql::value::Primary;

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn ctx() -> DatetimeContext {
    DatetimeContext::default()
}

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Primary {
    Primary::Datetime(utc().with_ymd_and_hms(y, mo, d, h, mi, s).unwrap())
}

// ============================================================================
// Numeric sniffing
// ============================================================================

#[test]
fn test_maybe_integer() {
    assert!(maybe_integer("0"));
    assert!(maybe_integer("12345"));
    assert!(maybe_integer("-12345"));
    assert!(maybe_integer("+12"));
    assert!(!maybe_integer("1.5"));
    assert!(!maybe_integer("1e+02"));
    assert!(!maybe_integer(""));
    assert!(!maybe_integer("+"));
    assert!(!maybe_integer("abc"));
}

#[test]
fn test_maybe_number() {
    assert!(maybe_number("12.345"));
    assert!(!maybe_number("12345."));
    assert!(maybe_number("1e+02"));
    assert!(!maybe_number("1e"));
    assert!(!maybe_number("1e02"));
    assert!(maybe_number("12345"));
    assert!(maybe_number("-1.5E-03"));
    assert!(!maybe_number(".5"));
    assert!(!maybe_number("-"));
    assert!(!maybe_number("2017-09-21"));
    assert!(!maybe_number("1.2.3"));
}

// ============================================================================
// Coercions
// ============================================================================

#[test]
fn test_to_integer() {
    assert_eq!(to_integer(&Primary::Integer(3)), Primary::Integer(3));
    assert_eq!(to_integer(&Primary::Float(3.0)), Primary::Integer(3));
    assert_eq!(to_integer(&Primary::Float(3.5)), Primary::Null);
    assert_eq!(
        to_integer(&Primary::String(" 42 ".to_string())),
        Primary::Integer(42)
    );
    assert_eq!(
        to_integer(&Primary::String("42.0".to_string())),
        Primary::Integer(42)
    );
    assert_eq!(to_integer(&Primary::String("42.5".to_string())), Primary::Null);
    assert_eq!(to_integer(&Primary::String("abc".to_string())), Primary::Null);
    assert_eq!(to_integer(&Primary::Boolean(true)), Primary::Null);
    assert_eq!(to_integer(&Primary::Null), Primary::Null);
}

#[test]
fn test_to_float() {
    assert_eq!(to_float(&Primary::Integer(3)), Primary::Float(3.0));
    assert_eq!(to_float(&Primary::Float(1.5)), Primary::Float(1.5));
    assert_eq!(
        to_float(&Primary::String("1.25".to_string())),
        Primary::Float(1.25)
    );
    assert_eq!(
        to_float(&Primary::String("1e+02".to_string())),
        Primary::Float(100.0)
    );
    // date-like strings do not sniff as numbers
    assert_eq!(
        to_float(&Primary::String("2017-09-21".to_string())),
        Primary::Null
    );
    assert_eq!(to_float(&Primary::Ternary(Ternary::True)), Primary::Null);
}

#[test]
fn test_to_datetime() {
    assert_eq!(
        to_datetime(&Primary::String("2012-02-03 09:18:15".to_string()), &ctx()),
        dt(2012, 2, 3, 9, 18, 15)
    );
    let already = dt(2012, 2, 3, 9, 18, 15);
    assert_eq!(to_datetime(&already, &ctx()), already);
    assert_eq!(
        to_datetime(&Primary::String("abc".to_string()), &ctx()),
        Primary::Null
    );
    // numbers do not coerce to datetimes
    assert_eq!(to_datetime(&Primary::Integer(1328260695), &ctx()), Primary::Null);
}

#[test]
fn test_to_boolean() {
    assert_eq!(to_boolean(&Primary::Boolean(true)), Primary::Boolean(true));
    assert_eq!(to_boolean(&Primary::Integer(1)), Primary::Boolean(true));
    assert_eq!(to_boolean(&Primary::Integer(0)), Primary::Boolean(false));
    assert_eq!(to_boolean(&Primary::Integer(2)), Primary::Null);
    assert_eq!(to_boolean(&Primary::Float(0.0)), Primary::Boolean(false));
    assert_eq!(
        to_boolean(&Primary::Ternary(Ternary::True)),
        Primary::Boolean(true)
    );
    assert_eq!(to_boolean(&Primary::Ternary(Ternary::Unknown)), Primary::Null);
    assert_eq!(
        to_boolean(&Primary::String("true".to_string())),
        Primary::Boolean(true)
    );
    assert_eq!(
        to_boolean(&Primary::String("F".to_string())),
        Primary::Boolean(false)
    );
    assert_eq!(to_boolean(&Primary::String("yes".to_string())), Primary::Null);
    assert_eq!(to_boolean(&Primary::Null), Primary::Null);
}

#[test]
fn test_to_string() {
    assert_eq!(
        to_string(&Primary::String("abc".to_string())),
        Primary::String("abc".to_string())
    );
    assert_eq!(
        to_string(&Primary::Integer(42)),
        Primary::String("42".to_string())
    );
    assert_eq!(
        to_string(&Primary::Float(1.5)),
        Primary::String("1.5".to_string())
    );
    // datetime has no implicit string coercion
    assert_eq!(to_string(&dt(2012, 2, 3, 9, 18, 15)), Primary::Null);
    assert_eq!(to_string(&Primary::Boolean(true)), Primary::Null);
    assert_eq!(to_string(&Primary::Null), Primary::Null);
}

// ============================================================================
// Datetime string parsing
// ============================================================================

#[test]
fn test_str_to_time_date_forms() {
    let c = ctx();
    assert_eq!(
        str_to_time("2012-02-03", &c),
        Some(utc().with_ymd_and_hms(2012, 2, 3, 0, 0, 0).unwrap())
    );
    assert_eq!(
        str_to_time("2012-2-3", &c),
        Some(utc().with_ymd_and_hms(2012, 2, 3, 0, 0, 0).unwrap())
    );
    assert_eq!(
        str_to_time("2012/02/03", &c),
        Some(utc().with_ymd_and_hms(2012, 2, 3, 0, 0, 0).unwrap())
    );
    assert_eq!(
        str_to_time(" 2012-02-03 ", &c),
        Some(utc().with_ymd_and_hms(2012, 2, 3, 0, 0, 0).unwrap())
    );
}

#[test]
fn test_str_to_time_datetime_forms() {
    let c = ctx();
    let expected = utc().with_ymd_and_hms(2012, 2, 3, 9, 18, 15).unwrap();
    assert_eq!(str_to_time("2012-02-03 09:18:15", &c), Some(expected));
    assert_eq!(str_to_time("2012-02-03T09:18:15", &c), Some(expected));
    assert_eq!(str_to_time("2012/02/03 09:18:15", &c), Some(expected));

    let with_fraction = str_to_time("2012-02-03 09:18:15.123", &c).unwrap();
    assert_eq!(
        with_fraction.timestamp_subsec_millis(),
        123,
        "fractional seconds survive"
    );
}

#[test]
fn test_str_to_time_offsets_and_zones() {
    let c = ctx();
    let offset = FixedOffset::west_opt(8 * 3600).unwrap();
    let expected = offset.with_ymd_and_hms(2012, 2, 3, 9, 18, 15).unwrap();
    assert_eq!(str_to_time("2012-02-03T09:18:15-08:00", &c), Some(expected));
    assert_eq!(str_to_time("2012-02-03 09:18:15 -08:00", &c), Some(expected));
    assert_eq!(str_to_time("2012-02-03 09:18:15 -0800", &c), Some(expected));
    assert_eq!(
        str_to_time("2012-02-03 09:18:15 GMT", &c),
        Some(utc().with_ymd_and_hms(2012, 2, 3, 9, 18, 15).unwrap())
    );
    // zone abbreviations other than universal time are not resolvable
    assert_eq!(str_to_time("2012-02-03 09:18:15 PST", &c), None);
}

#[test]
fn test_str_to_time_rfc822_fallbacks() {
    let c = ctx();
    let offset = FixedOffset::west_opt(7 * 3600).unwrap();
    assert_eq!(
        str_to_time("03 Feb 12 09:18 -0700", &c),
        Some(offset.with_ymd_and_hms(2012, 2, 3, 9, 18, 0).unwrap())
    );
    assert_eq!(
        str_to_time("03 Feb 12 09:18 UTC", &c),
        Some(utc().with_ymd_and_hms(2012, 2, 3, 9, 18, 0).unwrap())
    );
}

#[test]
fn test_str_to_time_rejections() {
    let c = ctx();
    assert_eq!(str_to_time("abcdefgh", &c), None);
    assert_eq!(str_to_time("2012-02", &c), None);
    assert_eq!(str_to_time("20120203", &c), None);
    assert_eq!(str_to_time("1234567", &c), None);
    assert_eq!(str_to_time("", &c), None);
}

#[test]
fn test_str_to_time_caller_formats() {
    let c = DatetimeContext {
        formats: vec!["%m/%d/%Y %H時%i分".to_string(), "%d-%m-%Y".to_string()],
        ..DatetimeContext::default()
    };
    assert_eq!(
        str_to_time("02/03/2012 09時18分", &c),
        Some(utc().with_ymd_and_hms(2012, 2, 3, 9, 18, 0).unwrap())
    );
    assert_eq!(
        str_to_time("03-02-2012", &c),
        Some(utc().with_ymd_and_hms(2012, 2, 3, 0, 0, 0).unwrap())
    );
}

#[test]
fn test_location_applies_to_naive_strings() {
    let jst = FixedOffset::east_opt(9 * 3600).unwrap();
    let c = DatetimeContext {
        location: jst,
        ..DatetimeContext::default()
    };
    assert_eq!(
        str_to_time("2012-02-03 09:18:15", &c),
        Some(jst.with_ymd_and_hms(2012, 2, 3, 9, 18, 15).unwrap())
    );
    // an explicit offset wins over the location
    let offset = FixedOffset::west_opt(8 * 3600).unwrap();
    assert_eq!(
        str_to_time("2012-02-03T09:18:15-08:00", &c),
        Some(offset.with_ymd_and_hms(2012, 2, 3, 9, 18, 15).unwrap())
    );
}
