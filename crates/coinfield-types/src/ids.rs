//! Type-safe identifier wrappers.
//!
//! Player identities originate outside this system (an account identity
//! from the submission gateway's backing service), so [`PlayerId`] wraps
//! an opaque string rather than a locally generated UUID. Transition log
//! records are minted locally and use UUID v7 (time-ordered) via
//! [`TransitionId`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// PlayerId
// ---------------------------------------------------------------------------

/// Opaque account identity of a player.
///
/// The contents are never parsed or decoded -- the id is only ever
/// compared, hashed, and used as a map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerId(String);

impl PlayerId {
    /// Wrap an account identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// TransitionId
// ---------------------------------------------------------------------------

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for one record in the transition log.
    TransitionId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_ids_compare_by_content() {
        assert_eq!(PlayerId::new("alice"), PlayerId::from("alice"));
        assert_ne!(PlayerId::new("alice"), PlayerId::new("bob"));
    }

    #[test]
    fn player_id_serializes_as_bare_string() {
        let id = PlayerId::new("acct-0x17");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"acct-0x17\"");
    }

    #[test]
    fn transition_ids_are_unique() {
        assert_ne!(TransitionId::new(), TransitionId::new());
    }
}
