use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Maximum number of fractional digits shown for non-integral results
pub const DISPLAY_PRECISION: usize = 10;

/// A number produced by evaluating an expression
///
/// Integer literals stay exact until an operation overflows `i64` or a
/// division is performed, at which point the value becomes a `Float`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    /// Parses the text of a NUMBER token
    pub fn from_literal(literal: &str) -> Result<Value, std::num::ParseFloatError> {
        if !literal.contains('.') {
            if let Ok(i) = literal.parse() {
                return Ok(Self::Int(i));
            }
        }
        literal.parse().map(Self::Float)
    }

    pub fn as_float(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(i) => i == 0,
            Self::Float(f) => f == 0.0,
        }
    }
}

macro_rules! op {
    ( $t: ident, $f: ident, $checked: ident ) => {
        impl $t for Value {
            type Output = Value;

            fn $f(self, rhs: Self) -> Self::Output {
                match (self, rhs) {
                    (Self::Int(l), Self::Int(r)) => match l.$checked(r) {
                        Some(v) => Self::Int(v),
                        None => Self::Float((l as f64).$f(r as f64)),
                    },
                    (l, r) => Self::Float(l.as_float().$f(r.as_float())),
                }
            }
        }
    };
}

op!(Add, add, checked_add);
op!(Sub, sub, checked_sub);
op!(Mul, mul, checked_mul);

// True division, the quotient of two integers is not truncated
impl Div for Value {
    type Output = Value;

    fn div(self, rhs: Self) -> Self::Output {
        Self::Float(self.as_float() / rhs.as_float())
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Self::Output {
        match self {
            Self::Int(i) => match i.checked_neg() {
                Some(v) => Self::Int(v),
                None => Self::Float(-(i as f64)),
            },
            Self::Float(f) => Self::Float(-f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(v) if !v.is_finite() => write!(f, "{}", v),
            Self::Float(v) if v == 0.0 => f.write_str("0"),
            Self::Float(v) if v.fract() == 0.0 => write!(f, "{:.0}", v),
            Self::Float(v) => {
                let rounded = format!("{:.*}", DISPLAY_PRECISION, v);
                let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
                match trimmed {
                    "-0" => f.write_str("0"),
                    t => f.write_str(t),
                }
            }
        }
    }
}
