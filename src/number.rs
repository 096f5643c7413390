//! Numeric payload of a document value

use std::cmp::Ordering;
use std::fmt;

/// A JSON-compatible number.
///
/// Integers that fit `i64` are stored as [`Number::Int`]; only values above
/// `i64::MAX` use [`Number::UInt`]. Comparison is numeric across variants, so
/// `Int(1) == Float(1.0)`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Number {
    /// Build from an unsigned value, preferring the signed representation.
    pub fn from_u64(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Number::Int(i),
            Err(_) => Number::UInt(v),
        }
    }

    /// Parse decimal text. Surrounding whitespace is ignored; anything that is
    /// not a finite number yields `None`.
    pub fn parse(text: &str) -> Option<Number> {
        let text = text.trim();
        if let Ok(i) = text.parse::<i64>() {
            return Some(Number::Int(i));
        }
        if let Ok(u) = text.parse::<u64>() {
            return Some(Number::UInt(u));
        }
        // f64::from_str also accepts "inf" and "NaN", which are not decimals
        if !text.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E')) {
            return None;
        }
        text.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Number::Float)
    }

    pub fn is_integer(&self) -> bool {
        !matches!(self, Number::Float(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Number::Float(f) => f.is_finite(),
            _ => true,
        }
    }

    /// Exact signed value, if representable.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::Int(i) => Some(i),
            Number::UInt(u) => i64::try_from(u).ok(),
            Number::Float(_) => None,
        }
    }

    /// Exact unsigned value, if representable.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Number::Int(i) => u64::try_from(i).ok(),
            Number::UInt(u) => Some(u),
            Number::Float(_) => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(i) => i as f64,
            Number::UInt(u) => u as f64,
            Number::Float(f) => f,
        }
    }

    /// Truncating conversion; out-of-range values saturate at the `i64` bounds.
    pub fn to_i64_lossy(&self) -> i64 {
        match *self {
            Number::Int(i) => i,
            Number::UInt(u) => i64::try_from(u).unwrap_or(i64::MAX),
            Number::Float(f) => f as i64,
        }
    }

    /// Truncating conversion; negative values wrap like a C cast.
    pub fn to_u64_lossy(&self) -> u64 {
        match *self {
            Number::Int(i) => i as u64,
            Number::UInt(u) => u,
            Number::Float(f) if f < 0.0 => (f as i64) as u64,
            Number::Float(f) => f as u64,
        }
    }

    pub fn is_zero(&self) -> bool {
        match *self {
            Number::Int(i) => i == 0,
            Number::UInt(u) => u == 0,
            Number::Float(f) => f == 0.0,
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::Int(0)
    }
}

fn cmp_int_uint(i: i64, u: u64) -> Ordering {
    if i < 0 {
        Ordering::Less
    } else {
        (i as u64).cmp(&u)
    }
}

// 2^127, exactly representable
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

// Exact comparison of an integer against a float, without rounding the integer.
fn cmp_int_float(i: i128, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    let whole = f.trunc();
    if whole >= I128_BOUND {
        return Some(Ordering::Less);
    }
    if whole < -I128_BOUND {
        return Some(Ordering::Greater);
    }
    match i.cmp(&(whole as i128)) {
        Ordering::Equal if f > whole => Some(Ordering::Less),
        Ordering::Equal if f < whole => Some(Ordering::Greater),
        ord => Some(ord),
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (Number::UInt(a), Number::UInt(b)) => Some(a.cmp(&b)),
            (Number::Int(a), Number::UInt(b)) => Some(cmp_int_uint(a, b)),
            (Number::UInt(a), Number::Int(b)) => Some(cmp_int_uint(b, a).reverse()),
            (Number::Int(a), Number::Float(b)) => cmp_int_float(i128::from(a), b),
            (Number::UInt(a), Number::Float(b)) => cmp_int_float(i128::from(a), b),
            (Number::Float(a), Number::Int(b)) => cmp_int_float(i128::from(b), a).map(Ordering::reverse),
            (Number::Float(a), Number::UInt(b)) => cmp_int_float(i128::from(b), a).map(Ordering::reverse),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::UInt(u) => write!(f, "{}", u),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! number_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(v: $t) -> Self {
                Number::Int(v as i64)
            }
        })*
    };
}

macro_rules! number_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(v: $t) -> Self {
                Number::from_u64(v as u64)
            }
        })*
    };
}

number_from_signed!(i8, i16, i32, i64, isize);
number_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Number::Float(v as f64)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::Int(i)
        } else if let Some(u) = n.as_u64() {
            Number::UInt(u)
        } else {
            Number::Float(n.as_f64().unwrap_or(0.0))
        }
    }
}

impl Number {
    /// Convert to a `serde_json::Number`; non-finite floats have no JSON form.
    pub fn to_json(&self) -> Option<serde_json::Number> {
        match *self {
            Number::Int(i) => Some(i.into()),
            Number::UInt(u) => Some(u.into()),
            Number::Float(f) => serde_json::Number::from_f64(f),
        }
    }
}
