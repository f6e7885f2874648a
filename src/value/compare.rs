use std::{cmp::Ordering, ptr};

use tracing::warn;

use super::{Value, ValueMap};
use crate::{ProfileError, Result};

/// Absolute difference under which two floats compare equal.
///
/// Absorbs the rounding noise floats pick up when a profile travels through
/// a transport encoding and back.
pub const DEFAULT_FLOAT_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StructPolicy {
    Reject,
    Fallback,
}

/// Structural comparator over [`Value`]s.
///
/// Produces a total, deterministic ordering:
///
/// 1. The same instance is always `Equal`.
/// 2. An absent value sorts after a present one.
/// 3. Values of different kinds are ordered by [`ValueKind`](super::ValueKind) ordinal.
/// 4. Scalars compare numerically, floats within the configured tolerance.
/// 5. Strings and string lists compare lexicographically; a list that is a
///    prefix of another sorts first.
/// 6. Byte arrays, lists and maps compare by length first, then content.
///    Map entries are visited in sorted key order and a key missing from
///    the right-hand map makes the left-hand map `Greater`.
/// 7. Nested values are unwrapped one level.
///
/// Struct values are reserved and have no ordering; see [`Comparator::try_compare`].
///
/// The float tolerance makes equality non-transitive across chains of
/// values that each differ by less than the tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparator {
    float_tolerance: f64,
}

impl Default for Comparator {
    fn default() -> Self {
        Self {
            float_tolerance: DEFAULT_FLOAT_TOLERANCE,
        }
    }
}

impl Comparator {
    /// Creates a comparator with a custom float tolerance.
    ///
    /// Negative or non-finite tolerances are clamped to zero.
    pub fn new(float_tolerance: f64) -> Self {
        let float_tolerance = if float_tolerance.is_finite() && float_tolerance > 0.0 {
            float_tolerance
        } else {
            0.0
        };

        Self { float_tolerance }
    }

    /// Comparator without float tolerance.
    pub fn strict() -> Self {
        Self {
            float_tolerance: 0.0,
        }
    }

    /// Absolute tolerance applied to float comparisons.
    pub fn float_tolerance(&self) -> f64 {
        self.float_tolerance
    }

    /// Compares two values, failing on reserved kinds.
    ///
    /// # Errors
    /// Returns `ProfileError::UnsupportedComparison` if a struct value is
    /// reached anywhere in the two trees, unless both sides are the same
    /// instance.
    pub fn try_compare(&self, a: &Value, b: &Value) -> Result<Ordering> {
        self.compare_values(a, b, StructPolicy::Reject)
    }

    /// Compares two possibly absent values, failing on reserved kinds.
    ///
    /// # Errors
    /// Returns `ProfileError::UnsupportedComparison` under the same
    /// conditions as [`Comparator::try_compare`].
    pub fn try_compare_optional(&self, a: Option<&Value>, b: Option<&Value>) -> Result<Ordering> {
        match (a, b) {
            (None, None) => Ok(Ordering::Equal),
            (None, Some(_)) => Ok(Ordering::Greater),
            (Some(_), None) => Ok(Ordering::Less),
            (Some(a), Some(b)) => self.try_compare(a, b),
        }
    }

    /// Compares two values.
    ///
    /// Struct values log a warning and fall back to ordering by member
    /// count; equal counts report `Greater`, so distinct struct values are
    /// never considered equal.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match self.compare_values(a, b, StructPolicy::Fallback) {
            Ok(ordering) => ordering,
            Err(_) => Ordering::Greater,
        }
    }

    /// Compares two possibly absent values. An absent value is `Greater`.
    pub fn compare_optional(&self, a: Option<&Value>, b: Option<&Value>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => self.compare(a, b),
        }
    }

    fn compare_values(&self, a: &Value, b: &Value, policy: StructPolicy) -> Result<Ordering> {
        if ptr::eq(a, b) {
            return Ok(Ordering::Equal);
        }

        let (kind_a, kind_b) = (a.kind(), b.kind());
        if kind_a != kind_b {
            return Ok(kind_a.cmp(&kind_b));
        }

        let ordering = match (a, b) {
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Integer(x), Value::Integer(y)) => x.cmp(y),
            (Value::Unsigned(x), Value::Unsigned(y)) => x.cmp(y),
            (Value::Float(x), Value::Float(y)) => self.compare_floats(*x, *y),
            (Value::String(x), Value::String(y)) => x.as_bytes().cmp(y.as_bytes()),
            (Value::StringList(x), Value::StringList(y)) => x.as_slice().cmp(y.as_slice()),
            (Value::ByteArray(x), Value::ByteArray(y)) => {
                x.len().cmp(&y.len()).then_with(|| x.cmp(y))
            }
            (Value::List(x), Value::List(y)) => self.compare_lists(x, y, policy)?,
            (Value::Map(x), Value::Map(y)) => self.compare_maps(x, y, policy)?,
            (Value::Nested(x), Value::Nested(y)) => self.compare_values(x, y, policy)?,
            (Value::Struct(x), Value::Struct(y)) => match policy {
                StructPolicy::Reject => {
                    return Err(ProfileError::UnsupportedComparison(kind_a));
                }
                StructPolicy::Fallback => {
                    warn!(
                        left_members = x.len(),
                        right_members = y.len(),
                        "struct values have no defined ordering, treating them as different"
                    );
                    x.len().cmp(&y.len()).then(Ordering::Greater)
                }
            },
            _ => unreachable!("kinds already matched"),
        };

        Ok(ordering)
    }

    fn compare_floats(&self, a: f64, b: f64) -> Ordering {
        if (a - b).abs() <= self.float_tolerance {
            Ordering::Equal
        } else {
            a.total_cmp(&b)
        }
    }

    fn compare_lists(&self, a: &[Value], b: &[Value], policy: StructPolicy) -> Result<Ordering> {
        if a.len() != b.len() {
            return Ok(a.len().cmp(&b.len()));
        }

        for (x, y) in a.iter().zip(b) {
            let ordering = self.compare_values(x, y, policy)?;
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }

        Ok(Ordering::Equal)
    }

    fn compare_maps(&self, a: &ValueMap, b: &ValueMap, policy: StructPolicy) -> Result<Ordering> {
        if a.len() != b.len() {
            return Ok(a.len().cmp(&b.len()));
        }

        for (key, x) in a {
            let Some(y) = b.get(key) else {
                return Ok(Ordering::Greater);
            };

            let ordering = self.compare_values(x, y, policy)?;
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }

        Ok(Ordering::Equal)
    }
}

/// Compares two values with the default float tolerance.
pub fn compare(a: &Value, b: &Value) -> Ordering {
    Comparator::default().compare(a, b)
}

/// Compares two possibly absent values with the default float tolerance.
pub fn compare_optional(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    Comparator::default().compare_optional(a, b)
}
