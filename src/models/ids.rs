//! Strongly-typed ID wrappers for ledger entities
//!
//! Identifiers are opaque tokens persisted as plain strings. New entities get
//! UUIDv4 text, but any stored string is kept as-is so hand-edited or foreign
//! records still load. Newtypes keep transaction and todo IDs from being
//! mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4().hyphenated().to_string())
            }

            /// Wrap an existing token
            pub fn from_token(token: impl Into<String>) -> Self {
                Self(token.into())
            }

            /// The stored token
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Short form used in listings (prefix + first 8 characters)
            pub fn short(&self) -> String {
                self.to_string()
            }

            /// Whether a user-typed fragment identifies this ID
            ///
            /// Accepts the full token, the short display form, or any leading
            /// part of the token (with or without the prefix).
            pub fn matches_prefix(&self, fragment: &str) -> bool {
                let fragment = fragment.trim();
                let fragment = fragment.strip_prefix($display_prefix).unwrap_or(fragment);
                !fragment.is_empty()
                    && self
                        .0
                        .to_lowercase()
                        .starts_with(&fragment.to_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let head: String = self.0.chars().take(8).collect();
                write!(f, "{}{}", $display_prefix, head)
            }
        }

        impl From<String> for $name {
            fn from(token: String) -> Self {
                Self(token)
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(TodoId, "todo-");
