//! Strongly typed identifier wrappers.
//!
//! Integer IDs are `Copy + Ord + Hash` so they can be used as map keys and
//! sorted collection elements without ceremony.  The inner integer is `pub`
//! to allow direct indexing via `id.0 as usize`, but callers should prefer
//! the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a slice index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Wrap a slice index.  Indices beyond the inner type's range
            /// saturate to `INVALID`.
            #[inline(always)]
            pub fn from_index(i: usize) -> Self {
                <$inner>::try_from(i).map($name).unwrap_or(Self::INVALID)
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a point on a curve.
    pub struct PointIndex(u32);
}

typed_id! {
    /// Handle returned when an observer subscribes to point events.
    pub struct SubscriptionId(u32);
}

/// Name of a per-point scalar field (e.g. `"speed"`, `"pause"`).
///
/// Fields are looked up by name in the external point storage, so the
/// identifier is a string rather than an integer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FieldId(pub String);

impl FieldId {
    pub fn new(name: impl Into<String>) -> Self {
        FieldId(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldId {
    fn from(name: &str) -> Self {
        FieldId(name.to_owned())
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
