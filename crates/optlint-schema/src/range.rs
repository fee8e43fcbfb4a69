//! # Range Pairs
//!
//! Parsing of `range` pairs. A range is a two-element array `[low, high]`
//! with `low <= high`. Integer and text-length ranges additionally hold
//! 32-bit signed bounds.
//!
//! Parsing reports *why* a range is malformed as a [`RangeDefect`]; the
//! caller turns that into a single diagnostic.

use std::fmt;

use optlint_core::ValueKind;
use serde_json::Value;

/// An inclusive `[low, high]` bound pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    /// Inclusive lower bound.
    pub low: T,
    /// Inclusive upper bound.
    pub high: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    /// True iff `low <= value <= high`.
    pub fn contains(&self, value: T) -> bool {
        self.low <= value && value <= self.high
    }
}

impl<T: fmt::Display> fmt::Display for Bounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

/// Why a `range` pair is malformed.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeDefect {
    /// The array does not have exactly two elements.
    Length(usize),
    /// An element has the wrong kind.
    ElementKind {
        /// Element position (0 or 1).
        index: usize,
        /// Kind the element was required to have.
        expected: ValueKind,
        /// Kind it actually has.
        found: ValueKind,
    },
    /// An integer bound lies outside the 32-bit signed span.
    OutOfBounds {
        /// Element position (0 or 1).
        index: usize,
    },
    /// `low > high`.
    Misordered,
}

impl fmt::Display for RangeDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(n) => write!(f, "expected 2 elements, found {n}"),
            Self::ElementKind {
                index,
                expected,
                found,
            } => write!(f, "element {index} is supposed to be {expected}, but is {found}"),
            Self::OutOfBounds { index } => {
                write!(f, "element {index} is outside the 32-bit signed range")
            }
            Self::Misordered => f.write_str("lower bound exceeds upper bound"),
        }
    }
}

fn pair(range: &[Value]) -> Result<(&Value, &Value), RangeDefect> {
    match range {
        [low, high] => Ok((low, high)),
        other => Err(RangeDefect::Length(other.len())),
    }
}

fn expect_kind(value: &Value, index: usize, expected: ValueKind) -> Result<(), RangeDefect> {
    let found = ValueKind::of(value);
    if found != expected {
        return Err(RangeDefect::ElementKind {
            index,
            expected,
            found,
        });
    }
    Ok(())
}

fn int_bound(value: &Value, index: usize) -> Result<i32, RangeDefect> {
    expect_kind(value, index, ValueKind::Integer)?;
    value
        .as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .ok_or(RangeDefect::OutOfBounds { index })
}

fn float_bound(value: &Value, index: usize) -> Result<f64, RangeDefect> {
    expect_kind(value, index, ValueKind::Float)?;
    // A float-kinded number always has an f64 value.
    value.as_f64().ok_or(RangeDefect::ElementKind {
        index,
        expected: ValueKind::Float,
        found: ValueKind::of(value),
    })
}

/// Parse an integer (or text-length) range bounded to `i32`.
pub fn int_range(range: &[Value]) -> Result<Bounds<i32>, RangeDefect> {
    let (low, high) = pair(range)?;
    let bounds = Bounds {
        low: int_bound(low, 0)?,
        high: int_bound(high, 1)?,
    };
    if bounds.low > bounds.high {
        return Err(RangeDefect::Misordered);
    }
    Ok(bounds)
}

/// Parse a floating-point range.
pub fn float_range(range: &[Value]) -> Result<Bounds<f64>, RangeDefect> {
    let (low, high) = pair(range)?;
    let bounds = Bounds {
        low: float_bound(low, 0)?,
        high: float_bound(high, 1)?,
    };
    if bounds.low > bounds.high {
        return Err(RangeDefect::Misordered);
    }
    Ok(bounds)
}
