//! Numeric value held by the window

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Largest magnitude below which every integer is exact in an `f64`
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A finite number as received from upstream.
///
/// Integers and fractional values share one representation, so `3` and
/// `3.0` are the same member. Values that are whole and within the exact
/// integer range serialize as JSON integers.
#[derive(Clone, Copy)]
pub struct WindowValue(f64);

impl WindowValue {
    /// `None` for NaN and infinities. `-0.0` is stored as `0.0`.
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(Self(if value == 0.0 { 0.0 } else { value }))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    fn as_exact_integer(self) -> Option<i64> {
        (self.0.fract() == 0.0 && self.0.abs() <= MAX_SAFE_INTEGER).then(|| self.0 as i64)
    }
}

/// Convert a raw upstream entry into a window value.
///
/// Any JSON number qualifies, integer or not. Strings, booleans, null and
/// nested values are dropped here so the merge never has to deal with them.
pub fn window_value(candidate: &Value) -> Option<WindowValue> {
    candidate.as_f64().and_then(WindowValue::new)
}

impl From<i64> for WindowValue {
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}

// Constructors never admit NaN, so equality is reflexive.
impl PartialEq for WindowValue {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for WindowValue {}

impl Hash for WindowValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for WindowValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_exact_integer() {
            Some(n) => write!(f, "{}", n),
            None => write!(f, "{}", self.0),
        }
    }
}

impl fmt::Debug for WindowValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for WindowValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_exact_integer() {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_f64(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for WindowValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        WindowValue::new(value).ok_or_else(|| de::Error::custom("window value must be finite"))
    }
}
