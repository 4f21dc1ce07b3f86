//! Common ID Types
//!
//! Type-safe wrappers around the numeric primary keys assigned by storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Generic typed ID wrapper
///
/// `0` means "not assigned yet"; storage assigns a positive value on insert.
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
///
/// let id = UserId::new(7);
/// assert!(id.is_assigned());
/// assert!(!UserId::default().is_assigned());
/// ```
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    value: i64,
    #[serde(skip)]
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// The value of a record that has not been stored yet
    pub const UNASSIGNED: i64 = 0;

    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the raw numeric value (for binding into queries)
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// Whether storage has assigned this ID
    pub const fn is_assigned(&self) -> bool {
        self.value > Self::UNASSIGNED
    }
}

// Manual impls: derives would require `T: Clone`, `T: PartialEq`, ... on the marker.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new(Self::UNASSIGNED)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self::new)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for User IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct User;

    /// Marker for Gallery IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Gallery;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type GalleryId = Id<markers::Gallery>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassigned_by_default() {
        let id = UserId::default();
        assert_eq!(id.value(), 0);
        assert!(!id.is_assigned());
    }

    #[test]
    fn test_parse() {
        let id: GalleryId = "42".parse().unwrap();
        assert_eq!(id, GalleryId::new(42));
        assert!("abc".parse::<GalleryId>().is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&UserId::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}
