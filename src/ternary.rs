//! Three-valued logic.
//!
//! SQL predicates do not evaluate to plain booleans: a comparison against
//! NULL produces neither true nor false. [`Ternary`] models that algebra
//! with an explicit `Unknown` state that absorbs through `and`/`or`
//! unless a dominant operand (`False` for `and`, `True` for `or`)
//! short-circuits it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A truth value in three-valued logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ternary {
    False,
    Unknown,
    True,
}

/// Error returned when a string is not a ternary literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parsing {0:?}: invalid syntax")]
pub struct ParseTernaryError(pub String);

impl Ternary {
    /// Logical negation. `Unknown` stays `Unknown`.
    pub fn not(self) -> Ternary {
        match self {
            Ternary::False => Ternary::True,
            Ternary::True => Ternary::False,
            Ternary::Unknown => Ternary::Unknown,
        }
    }

    /// Logical conjunction. `False` is absorbing, then `Unknown`.
    pub fn and(self, other: Ternary) -> Ternary {
        if self == Ternary::False || other == Ternary::False {
            Ternary::False
        } else if self == Ternary::Unknown || other == Ternary::Unknown {
            Ternary::Unknown
        } else {
            Ternary::True
        }
    }

    /// Logical disjunction. `True` is absorbing, then `Unknown`.
    pub fn or(self, other: Ternary) -> Ternary {
        if self == Ternary::True || other == Ternary::True {
            Ternary::True
        } else if self == Ternary::Unknown || other == Ternary::Unknown {
            Ternary::Unknown
        } else {
            Ternary::False
        }
    }

    pub fn from_bool(b: bool) -> Ternary {
        if b { Ternary::True } else { Ternary::False }
    }

    /// Collapse to a plain boolean: only `True` maps to `true`.
    pub fn as_bool(self) -> bool {
        self == Ternary::True
    }
}

/// Fold `and` over a sequence. An empty sequence is `True`.
pub fn all(values: &[Ternary]) -> Ternary {
    values
        .iter()
        .copied()
        .fold(Ternary::True, |acc, v| acc.and(v))
}

/// Fold `or` over a sequence. An empty sequence is `False`.
pub fn any(values: &[Ternary]) -> Ternary {
    values
        .iter()
        .copied()
        .fold(Ternary::False, |acc, v| acc.or(v))
}

impl fmt::Display for Ternary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Ternary::False => "FALSE",
            Ternary::Unknown => "UNKNOWN",
            Ternary::True => "TRUE",
        };
        f.write_str(s)
    }
}

impl FromStr for Ternary {
    type Err = ParseTernaryError;

    /// Accepts the literal forms `true`/`1`, `false`/`-1` and
    /// `unknown`/`0`, case-insensitively.
    fn from_str(s: &str) -> Result<Ternary, ParseTernaryError> {
        if s.eq_ignore_ascii_case("true") || s == "1" {
            Ok(Ternary::True)
        } else if s.eq_ignore_ascii_case("false") || s == "-1" {
            Ok(Ternary::False)
        } else if s.eq_ignore_ascii_case("unknown") || s == "0" {
            Ok(Ternary::Unknown)
        } else {
            Err(ParseTernaryError(s.to_string()))
        }
    }
}
