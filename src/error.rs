//! Error types returned by `RandomMap` and `DenseIndex`.
//!
//! Missing keys and empty maps are not errors; those cases return `None`.

use thiserror::Error;

/// Returned by [`RandomMap::try_insert`](crate::RandomMap::try_insert) when
/// the key is already live. The map is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("key is already present in the map")]
    DuplicateKey,
}

/// Returned by `check_invariants` when the value map, the dense key order and
/// the position index disagree. Carries a description of the failed check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invariant violated: {0}")]
pub struct InvariantError(String);

impl InvariantError {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            InsertError::DuplicateKey.to_string(),
            "key is already present in the map"
        );
        let e = InvariantError::new("len mismatch");
        assert_eq!(e.message(), "len mismatch");
        assert_eq!(e.to_string(), "invariant violated: len mismatch");
    }
}
