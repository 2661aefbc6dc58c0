//! Typed entity identifiers
//!
//! Each entity has its own id newtype over ULID. ULIDs are
//! lexicographically ordered by creation time, which keyset pagination
//! relies on: descending id order is newest-first.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ulid::Ulid;

/// Error returned when an identifier fails to parse
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier: {0}")]
pub struct ParseIdError(pub String);

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Ulid);

        impl $name {
            /// Generate a fresh id
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self(Ulid::new())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ulid::from_str(s)
                    .map(Self)
                    .map_err(|_| ParseIdError(s.to_string()))
            }
        }

        impl From<Ulid> for $name {
            fn from(ulid: Ulid) -> Self {
                Self(ulid)
            }
        }
    };
}

entity_id! {
    /// Unique user identifier
    UserId
}

entity_id! {
    /// Unique notebook identifier
    NotebookId
}

entity_id! {
    /// Unique proposal identifier
    ProposalId
}

entity_id! {
    /// Unique comment identifier
    CommentId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_generation_is_unique() {
        let a = ProposalId::new();
        let b = ProposalId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn id_round_trips_through_display() {
        let id = CommentId::new();
        let parsed: CommentId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn id_rejects_garbage() {
        let err = "not-a-ulid".parse::<UserId>();
        assert!(err.is_err());
    }

    #[test]
    fn id_serializes_as_plain_string() {
        let id = NotebookId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
