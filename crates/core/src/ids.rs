//! Typed Ids

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
    num::ParseIntError,
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors raised while allocating or parsing identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    /// Every integer id has been handed out.
    #[error("id space exhausted")]
    Exhausted,

    /// User ids must be 1-64 characters of `[A-Za-z0-9_-]`.
    #[error("invalid user id: {0:?}")]
    InvalidUserId(String),
}

/// Integer identifier tagged with the record type it belongs to.
pub struct TypedId<T>(u64, PhantomData<T>);

impl<T> TypedId<T> {
    /// Wrap a raw integer id.
    pub const fn new(id: u64) -> Self {
        Self(id, PhantomData)
    }

    /// The raw integer id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedId<T> {}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<u64> for TypedId<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<T> From<TypedId<T>> for u64 {
    fn from(value: TypedId<T>) -> Self {
        value.get()
    }
}

impl<T> FromStr for TypedId<T> {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self::new)
    }
}

impl<T> Serialize for TypedId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for TypedId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::new)
    }
}

/// How new record ids are chosen relative to the ids already handed out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdPolicy {
    /// Never reuse an id, even after the record holding it was deleted.
    #[default]
    Monotonic,

    /// `max(remaining ids) + 1`; deleting the newest record frees its id.
    ReuseFreed,
}

impl IdPolicy {
    /// Pick the next id given the highest id ever assigned and the ids still in use.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::Exhausted`] when the next id would overflow.
    pub fn next_id(
        self,
        last_assigned: u64,
        existing: impl IntoIterator<Item = u64>,
    ) -> Result<u64, IdError> {
        let max_existing = existing.into_iter().max().unwrap_or(0);

        let base = match self {
            Self::Monotonic => max_existing.max(last_assigned),
            Self::ReuseFreed => max_existing,
        };

        base.checked_add(1).ok_or(IdError::Exhausted)
    }
}

impl FromStr for IdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monotonic" => Ok(Self::Monotonic),
            "reuse-freed" | "reuse_freed" => Ok(Self::ReuseFreed),
            other => Err(format!("unknown id policy: {other}")),
        }
    }
}

/// Shopper identity used to key carts and order ownership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and wrap a user id.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidUserId`] for empty, overlong or non `[A-Za-z0-9_-]` ids.
    pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
        let id = id.into();

        let valid = !id.is_empty()
            && id.len() <= 64
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if valid {
            Ok(Self(id))
        } else {
            Err(IdError::InvalidUserId(id))
        }
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}
