//! Numeric values of the guest runtime.

use std::fmt;

// 2^63 as f64; the exclusive upper bound of floats representable as i64.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// A guest number: either an integer or a double-precision float.
///
/// Equality is numeric, so `Integer(3) == Float(3.0)`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns the value as a double.
    pub fn to_f64(&self) -> f64 {
        match *self {
            Number::Integer(value) => value as f64,
            Number::Float(value) => value,
        }
    }

    /// Returns the exact integer this number represents, if any.
    ///
    /// Floats qualify when they are finite, have no fractional part and fit
    /// in an `i64`.
    pub fn as_exact_integer(&self) -> Option<i64> {
        match *self {
            Number::Integer(value) => Some(value),
            Number::Float(value) => {
                if value.is_finite() && value.fract() == 0.0 && (-I64_UPPER..I64_UPPER).contains(&value)
                {
                    Some(value as i64)
                } else {
                    None
                }
            }
        }
    }

    /// True when the number equals its own integral rounding.
    pub fn is_integral(&self) -> bool {
        match *self {
            Number::Integer(_) => true,
            Number::Float(value) => value == value.round(),
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(*self, Number::Float(value) if value.is_nan())
    }

    /// Collapses floats with an exact integer representation to `Integer`.
    pub fn normalized(self) -> Self {
        match self.as_exact_integer() {
            Some(value) => Number::Integer(value),
            None => self,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (a, b) => a.to_f64() == b.to_f64(),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value.into())
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value.into())
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(value) => write!(f, "{}", value),
            Number::Float(value) => write!(f, "{}", value),
        }
    }
}
