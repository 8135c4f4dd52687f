//! Optional-number values.
//!
//! slurmrestd wraps many integers in a `{set, infinite, number}` object
//! (inline in some versions, named types in others). Each version crate
//! decodes its own shape into [`OptionalNumber`] and nothing else leaves the
//! converter layer.

use serde::{Deserialize, Serialize};

/// A decoded optional number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionalNumber<T> {
    /// `set` was false or the wrapper was absent.
    #[default]
    Unset,
    /// `infinite` was true.
    Infinite,
    Value(T),
}

impl<T: Copy + Default + PartialEq> OptionalNumber<T> {
    /// Decode the three wire parts. `infinite` wins over `set`.
    pub fn from_parts(set: Option<bool>, infinite: Option<bool>, number: Option<T>) -> Self {
        if infinite == Some(true) {
            return Self::Infinite;
        }
        match (set, number) {
            (Some(true), Some(n)) => Self::Value(n),
            _ => Self::Unset,
        }
    }

    /// Domain value with zero meaning "unset or unlimited".
    pub fn value_or_zero(self) -> T {
        match self {
            Self::Value(n) => n,
            Self::Unset | Self::Infinite => T::default(),
        }
    }

    /// Treat a zero domain value as absent.
    pub fn from_nonzero(value: T) -> Self {
        if value == T::default() {
            Self::Unset
        } else {
            Self::Value(value)
        }
    }

    pub fn as_option(self) -> Option<T> {
        match self {
            Self::Value(n) => Some(n),
            _ => None,
        }
    }
}

/// The `{set, infinite, number}` wire wrapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NoVal<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infinite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<T>,
}

impl<T: Copy + Default + PartialEq> NoVal<T> {
    /// A set, finite value.
    pub fn value(number: T) -> Self {
        Self {
            set: Some(true),
            infinite: Some(false),
            number: Some(number),
        }
    }

    pub fn decode(&self) -> OptionalNumber<T> {
        OptionalNumber::from_parts(self.set, self.infinite, self.number)
    }

    /// Wrapper for a domain value; zero is "unset" and is omitted.
    pub fn present(number: T) -> Option<Self> {
        OptionalNumber::from_nonzero(number).as_option().map(Self::value)
    }

    /// Wrapper for an optional request field.
    pub fn from_option(number: Option<T>) -> Option<Self> {
        number.map(Self::value)
    }
}

/// Collapse an absent or unset wrapper to zero.
pub fn noval_or_zero<T: Copy + Default + PartialEq>(wire: Option<&NoVal<T>>) -> T {
    wire.map(|w| w.decode().value_or_zero()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        assert_eq!(
            OptionalNumber::from_parts(Some(true), Some(false), Some(60u32)),
            OptionalNumber::Value(60)
        );
        assert_eq!(
            OptionalNumber::from_parts(Some(false), Some(false), Some(60u32)),
            OptionalNumber::Unset
        );
        assert_eq!(
            OptionalNumber::<u32>::from_parts(None, None, None),
            OptionalNumber::Unset
        );
        assert_eq!(
            OptionalNumber::from_parts(Some(true), Some(true), Some(0u32)),
            OptionalNumber::Infinite
        );
    }

    #[test]
    fn test_value_or_zero() {
        assert_eq!(OptionalNumber::Value(5u64).value_or_zero(), 5);
        assert_eq!(OptionalNumber::<u64>::Unset.value_or_zero(), 0);
        assert_eq!(OptionalNumber::<u64>::Infinite.value_or_zero(), 0);
    }

    #[test]
    fn test_from_nonzero() {
        assert_eq!(OptionalNumber::from_nonzero(0i32), OptionalNumber::Unset);
        assert_eq!(OptionalNumber::from_nonzero(3i32).as_option(), Some(3));
        assert_eq!(OptionalNumber::from_nonzero(0u32).as_option(), None);
    }

    #[test]
    fn test_noval_wire_shape() {
        let wire: NoVal<u32> =
            serde_json::from_str(r#"{"set": true, "infinite": false, "number": 30}"#).unwrap();
        assert_eq!(wire.decode(), OptionalNumber::Value(30));
        assert_eq!(noval_or_zero(Some(&wire)), 30);

        let infinite: NoVal<u32> =
            serde_json::from_str(r#"{"set": false, "infinite": true, "number": 0}"#).unwrap();
        assert_eq!(noval_or_zero(Some(&infinite)), 0);
        assert_eq!(noval_or_zero::<u32>(None), 0);
    }

    #[test]
    fn test_noval_present_omits_zero() {
        assert_eq!(NoVal::present(0u64), None);
        assert_eq!(
            serde_json::to_string(&NoVal::present(8u64)).unwrap(),
            r#"{"set":true,"infinite":false,"number":8}"#
        );
    }
}
