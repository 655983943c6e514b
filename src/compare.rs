//! Cross-type comparison with an explicit "incommensurable" outcome.
//!
//! [`compare_combinedly`] tries progressively weaker views of its two
//! operands — integer, float, datetime, boolean, then plain string —
//! and reports `Incommensurable` when no shared view exists, instead of
//! raising or silently answering false. Boolean equality is kept apart
//! from ordered equality (`BoolEqual` vs `Equal`) so that an upstream
//! ordering operator can refuse to order booleans.

use std::fmt;

use crate::coerce::{to_boolean, to_datetime, to_float, to_integer, DatetimeContext};
use crate::error::ComparisonError;
use crate::ternary::Ternary;
use crate::value::Primary;

/// An ordered tuple of scalars compared element-wise as a unit.
pub type RowValue = Vec<Primary>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonResult {
    Equal,
    BoolEqual,
    NotEqual,
    Less,
    Greater,
    Incommensurable,
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComparisonResult::Equal => "EQUAL",
            ComparisonResult::BoolEqual => "BOOL_EQUAL",
            ComparisonResult::NotEqual => "NOT_EQUAL",
            ComparisonResult::Less => "LESS",
            ComparisonResult::Greater => "GREATER",
            ComparisonResult::Incommensurable => "INCOMMENSURABLE",
        };
        f.write_str(s)
    }
}

fn order<T: PartialOrd>(v1: T, v2: T) -> ComparisonResult {
    if v1 == v2 {
        ComparisonResult::Equal
    } else if v1 < v2 {
        ComparisonResult::Less
    } else {
        ComparisonResult::Greater
    }
}

/// Compare two scalars under mixed-type semantics.
pub fn compare_combinedly(p1: &Primary, p2: &Primary, ctx: &DatetimeContext) -> ComparisonResult {
    if p1.is_null() || p2.is_null() {
        return ComparisonResult::Incommensurable;
    }

    if let Primary::Integer(i1) = to_integer(p1) {
        if let Primary::Integer(i2) = to_integer(p2) {
            return order(i1, i2);
        }
    }

    if let Primary::Float(f1) = to_float(p1) {
        if let Primary::Float(f2) = to_float(p2) {
            return order(f1, f2);
        }
    }

    if let Primary::Datetime(d1) = to_datetime(p1, ctx) {
        if let Primary::Datetime(d2) = to_datetime(p2, ctx) {
            return order(d1, d2);
        }
    }

    if let Primary::Boolean(b1) = to_boolean(p1) {
        if let Primary::Boolean(b2) = to_boolean(p2) {
            if b1 == b2 {
                return ComparisonResult::BoolEqual;
            }
            return ComparisonResult::NotEqual;
        }
    }

    if let (Primary::String(s1), Primary::String(s2)) = (p1, p2) {
        let v1 = s1.trim().to_uppercase();
        let v2 = s2.trim().to_uppercase();
        return order(v1, v2);
    }

    ComparisonResult::Incommensurable
}

pub fn equal(p1: &Primary, p2: &Primary, ctx: &DatetimeContext) -> Ternary {
    match compare_combinedly(p1, p2, ctx) {
        ComparisonResult::Incommensurable => Ternary::Unknown,
        r => Ternary::from_bool(r == ComparisonResult::Equal || r == ComparisonResult::BoolEqual),
    }
}

pub fn not_equal(p1: &Primary, p2: &Primary, ctx: &DatetimeContext) -> Ternary {
    match compare_combinedly(p1, p2, ctx) {
        ComparisonResult::Incommensurable => Ternary::Unknown,
        r => Ternary::from_bool(r != ComparisonResult::Equal && r != ComparisonResult::BoolEqual),
    }
}

fn ordered(r: ComparisonResult) -> bool {
    !matches!(
        r,
        ComparisonResult::Incommensurable | ComparisonResult::NotEqual | ComparisonResult::BoolEqual
    )
}

pub fn less(p1: &Primary, p2: &Primary, ctx: &DatetimeContext) -> Ternary {
    match compare_combinedly(p1, p2, ctx) {
        r if ordered(r) => Ternary::from_bool(r == ComparisonResult::Less),
        _ => Ternary::Unknown,
    }
}

pub fn greater(p1: &Primary, p2: &Primary, ctx: &DatetimeContext) -> Ternary {
    match compare_combinedly(p1, p2, ctx) {
        r if ordered(r) => Ternary::from_bool(r == ComparisonResult::Greater),
        _ => Ternary::Unknown,
    }
}

pub fn less_or_equal(p1: &Primary, p2: &Primary, ctx: &DatetimeContext) -> Ternary {
    match compare_combinedly(p1, p2, ctx) {
        r if ordered(r) => Ternary::from_bool(r != ComparisonResult::Greater),
        _ => Ternary::Unknown,
    }
}

pub fn greater_or_equal(p1: &Primary, p2: &Primary, ctx: &DatetimeContext) -> Ternary {
    match compare_combinedly(p1, p2, ctx) {
        r if ordered(r) => Ternary::from_bool(r != ComparisonResult::Less),
        _ => Ternary::Unknown,
    }
}

/// Dispatch on the textual operator. `<>` and any unrecognized spelling
/// fall through to not-equal, mirroring the operator set the lexer can
/// produce.
pub fn compare(p1: &Primary, p2: &Primary, operator: &str, ctx: &DatetimeContext) -> Ternary {
    match operator {
        "=" => equal(p1, p2, ctx),
        ">" => greater(p1, p2, ctx),
        "<" => less(p1, p2, ctx),
        ">=" => greater_or_equal(p1, p2, ctx),
        "<=" => less_or_equal(p1, p2, ctx),
        _ => not_equal(p1, p2, ctx),
    }
}

/// Compare two tuples element-wise, left to right.
///
/// An absent tuple on either side is `Unknown` without error; tuples of
/// different arity are a caller error. For the equality family an
/// incommensurable element defers the verdict unless it is the last
/// element; for ordering operators any unorderable element answers
/// `Unknown` immediately, and the first strict inequality decides.
pub fn compare_row_values(
    row_value1: Option<&RowValue>,
    row_value2: Option<&RowValue>,
    operator: &str,
    ctx: &DatetimeContext,
) -> Result<Ternary, ComparisonError> {
    let (r1, r2) = match (row_value1, row_value2) {
        (Some(r1), Some(r2)) => (r1, r2),
        _ => return Ok(Ternary::Unknown),
    };

    if r1.len() != r2.len() {
        return Err(ComparisonError::RowValueLengthMismatch);
    }

    let mut unknown = false;
    for i in 0..r1.len() {
        let r = compare_combinedly(&r1[i], &r2[i], ctx);

        if r == ComparisonResult::Incommensurable {
            if matches!(operator, "=" | "<>" | "!=") && i < r1.len() - 1 {
                unknown = true;
                continue;
            }
            return Ok(Ternary::Unknown);
        }

        if matches!(operator, ">" | "<" | ">=" | "<=")
            && matches!(r, ComparisonResult::NotEqual | ComparisonResult::BoolEqual)
        {
            return Ok(Ternary::Unknown);
        }

        match operator {
            "=" => {
                if r != ComparisonResult::Equal && r != ComparisonResult::BoolEqual {
                    return Ok(Ternary::False);
                }
            }
            ">" | ">=" => match r {
                ComparisonResult::Greater => return Ok(Ternary::True),
                ComparisonResult::Less => return Ok(Ternary::False),
                _ => {}
            },
            "<" | "<=" => match r {
                ComparisonResult::Less => return Ok(Ternary::True),
                ComparisonResult::Greater => return Ok(Ternary::False),
                _ => {}
            },
            "<>" | "!=" => {
                if r != ComparisonResult::Equal && r != ComparisonResult::BoolEqual {
                    return Ok(Ternary::True);
                }
            }
            _ => {}
        }
    }

    if unknown {
        return Ok(Ternary::Unknown);
    }

    // every element compared equal
    match operator {
        ">" | "<" | "<>" | "!=" => Ok(Ternary::False),
        _ => Ok(Ternary::True),
    }
}

/// Like [`equal`], but two NULLs are equivalent.
pub fn equivalent(p1: &Primary, p2: &Primary, ctx: &DatetimeContext) -> Ternary {
    if p1.is_null() && p2.is_null() {
        return Ternary::True;
    }
    equal(p1, p2, ctx)
}
