//! The `Primary` scalar domain.
//!
//! Every cell, literal and intermediate result in the engine is one of
//! these seven variants. Values are immutable; "conversions" always
//! build a new value (or `Null`) through the `coerce` module. Consumers
//! outside the type substrate interact with a value through exactly two
//! capabilities: its canonical text ([`fmt::Display`]) and its
//! three-valued truth projection ([`Primary::ternary`]).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::ternary::Ternary;

/// A typed scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Ternary(Ternary),
    Datetime(DateTime<FixedOffset>),
    Null,
}

impl Primary {
    /// Build an integer from text the lexer has already validated.
    /// Malformed input yields zero rather than an error.
    pub fn integer_from_str(s: &str) -> Primary {
        Primary::Integer(s.parse::<i64>().unwrap_or(0))
    }

    /// Build a float from text the lexer has already validated.
    /// Malformed input yields zero rather than an error.
    pub fn float_from_str(s: &str) -> Primary {
        Primary::Float(s.parse::<f64>().unwrap_or(0.0))
    }

    /// Build a ternary value from a literal, defaulting to `False` on
    /// malformed input (the lexer only emits validated literals).
    pub fn ternary_from_str(s: &str) -> Primary {
        Primary::Ternary(Ternary::from_str(s).unwrap_or(Ternary::False))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Primary::Null)
    }

    /// Project the value onto three-valued truth.
    ///
    /// Strings answer `True`/`False` only when the trimmed text is a
    /// boolean literal; numbers only for exactly 1 and 0; datetimes and
    /// NULL are always `Unknown`.
    pub fn ternary(&self) -> Ternary {
        match self {
            Primary::String(s) => match parse_bool_literal(s.trim()) {
                Some(b) => Ternary::from_bool(b),
                None => Ternary::Unknown,
            },
            Primary::Integer(i) => match i {
                1 => Ternary::True,
                0 => Ternary::False,
                _ => Ternary::Unknown,
            },
            Primary::Float(f) => {
                if *f == 1.0 {
                    Ternary::True
                } else if *f == 0.0 {
                    Ternary::False
                } else {
                    Ternary::Unknown
                }
            }
            Primary::Boolean(b) => Ternary::from_bool(*b),
            Primary::Ternary(t) => *t,
            Primary::Datetime(_) => Ternary::Unknown,
            Primary::Null => Ternary::Unknown,
        }
    }
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primary::String(s) => write!(f, "'{}'", s),
            Primary::Integer(i) => write!(f, "{}", i),
            Primary::Float(fl) => write!(f, "{}", fl),
            Primary::Boolean(b) => write!(f, "{}", b),
            Primary::Ternary(t) => write!(f, "{}", t),
            Primary::Datetime(dt) => {
                write!(f, "'{}'", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Primary::Null => f.write_str("NULL"),
        }
    }
}

/// Parse a boolean literal the way the coercion rules define one:
/// `1 t T TRUE true True` / `0 f F FALSE false False`.
pub fn parse_bool_literal(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_canonical_text() {
        assert_eq!(Primary::String("str".to_string()).to_string(), "'str'");
        assert_eq!(Primary::Integer(-12).to_string(), "-12");
        assert_eq!(Primary::Float(1.5).to_string(), "1.5");
        assert_eq!(Primary::Float(1.0).to_string(), "1");
        assert_eq!(Primary::Boolean(true).to_string(), "true");
        assert_eq!(Primary::Ternary(Ternary::Unknown).to_string(), "UNKNOWN");
        assert_eq!(Primary::Null.to_string(), "NULL");

        let dt = utc().with_ymd_and_hms(2012, 2, 3, 9, 18, 15).unwrap();
        assert_eq!(Primary::Datetime(dt).to_string(), "'2012-02-03T09:18:15Z'");
    }

    #[test]
    fn test_ternary_projection() {
        assert_eq!(Primary::String("true".to_string()).ternary(), Ternary::True);
        assert_eq!(Primary::String(" F ".to_string()).ternary(), Ternary::False);
        assert_eq!(
            Primary::String("something".to_string()).ternary(),
            Ternary::Unknown
        );
        assert_eq!(Primary::Integer(1).ternary(), Ternary::True);
        assert_eq!(Primary::Integer(0).ternary(), Ternary::False);
        assert_eq!(Primary::Integer(2).ternary(), Ternary::Unknown);
        assert_eq!(Primary::Float(1.0).ternary(), Ternary::True);
        assert_eq!(Primary::Float(0.0).ternary(), Ternary::False);
        assert_eq!(Primary::Float(0.5).ternary(), Ternary::Unknown);
        assert_eq!(Primary::Boolean(false).ternary(), Ternary::False);
        assert_eq!(
            Primary::Ternary(Ternary::Unknown).ternary(),
            Ternary::Unknown
        );
        let dt = utc().with_ymd_and_hms(2012, 2, 3, 9, 18, 15).unwrap();
        assert_eq!(Primary::Datetime(dt).ternary(), Ternary::Unknown);
        assert_eq!(Primary::Null.ternary(), Ternary::Unknown);
    }

    #[test]
    fn test_literal_constructors() {
        assert_eq!(Primary::integer_from_str("42"), Primary::Integer(42));
        assert_eq!(Primary::integer_from_str("err"), Primary::Integer(0));
        assert_eq!(Primary::float_from_str("1.25"), Primary::Float(1.25));
        assert_eq!(Primary::float_from_str("err"), Primary::Float(0.0));
        assert_eq!(
            Primary::ternary_from_str("unknown"),
            Primary::Ternary(Ternary::Unknown)
        );
    }
}
