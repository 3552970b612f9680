//! Group and queue value objects.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A group key: a string tag shared by queued units of work that should be
/// processed together in bounded portions.
///
/// Distinctness is exact string equality; keys are never normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    /// Create a group key, rejecting empty strings.
    pub fn new(key: impl Into<String>) -> Result<Self, DomainError> {
        let key = key.into();
        if key.is_empty() {
            return Err(DomainError::validation("group key must not be empty"));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a dispatch queue.
///
/// A job with a queue assigned is already claimed by a different dispatch path
/// and is excluded from group reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueName(String);

impl QueueName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_key_rejects_empty() {
        assert!(matches!(GroupKey::new(""), Err(DomainError::Validation(_))));
    }

    #[test]
    fn group_key_equality_is_exact() {
        let a = GroupKey::new("sales").unwrap();
        let b = GroupKey::new("Sales").unwrap();
        assert_ne!(a, b);
        assert_eq!(a, GroupKey::new("sales").unwrap());
    }
}
