use crate::value::Value;
use std::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

// 2^127: the first float magnitude outside i128.
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

///
/// RangeKey
///
/// Numeric range key of one index row. Integer, unsigned, timestamp and
/// integral float values of the same number are the same key, and keys order
/// by number regardless of the variant they came from.
///

#[derive(Clone, Copy, Debug)]
pub struct RangeKey(Number);

#[derive(Clone, Copy, Debug)]
enum Number {
    Int(i128),
    // Non-integral, out of i128 range, infinite or NaN.
    Float(f64),
}

impl RangeKey {
    /// Numeric key for a value; `None` when the value is not numeric.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(Self::from(*v)),
            Value::Uint(v) | Value::Timestamp(v) => Some(Self::from(*v)),
            Value::Float64(v) => Some(Self::from(*v)),
            _ => None,
        }
    }
}

impl From<i64> for RangeKey {
    fn from(v: i64) -> Self {
        Self(Number::Int(i128::from(v)))
    }
}

impl From<u64> for RangeKey {
    fn from(v: u64) -> Self {
        Self(Number::Int(i128::from(v)))
    }
}

impl From<f64> for RangeKey {
    #[allow(clippy::cast_possible_truncation)]
    fn from(v: f64) -> Self {
        if v.fract() == 0.0 && (-I128_BOUND..I128_BOUND).contains(&v) {
            Self(Number::Int(v as i128))
        } else {
            Self(Number::Float(v))
        }
    }
}

impl Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Number::Int(v) => write!(f, "{v}"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}

impl PartialEq for RangeKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RangeKey {}

impl PartialOrd for RangeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RangeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Float(a), Number::Float(b)) => a.total_cmp(&b),
            (Number::Int(a), Number::Float(b)) => cmp_int_float(a, b),
            (Number::Float(a), Number::Int(b)) => cmp_int_float(b, a).reverse(),
        }
    }
}

impl Hash for RangeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.0 {
            Number::Int(v) => {
                0_u8.hash(state);
                v.hash(state);
            }
            Number::Float(v) => {
                1_u8.hash(state);
                v.to_bits().hash(state);
            }
        }
    }
}

// `float` is never integral within i128 here, so the two are never equal.
#[allow(clippy::cast_precision_loss)]
fn cmp_int_float(int: i128, float: f64) -> Ordering {
    if float.is_nan() || float >= I128_BOUND {
        Ordering::Less
    } else if float < -I128_BOUND {
        Ordering::Greater
    } else {
        (int as f64).partial_cmp(&float).unwrap_or(Ordering::Less)
    }
}

///
/// TESTS
///
