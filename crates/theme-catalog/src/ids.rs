//! Newtype IDs for catalog entities.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.trim().to_string())
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(n.to_string())
            }
        }
    };
}

define_id!(
    /// Category entity ID, one segment of a materialized category path.
    CategoryId
);

impl CategoryId {
    /// Split a materialized path (`"1/2/12"`) into IDs, root first. Empty
    /// segments are ignored.
    pub fn parse_path(path: &str) -> Vec<CategoryId> {
        path.split('/')
            .filter(|segment| !segment.trim().is_empty())
            .map(CategoryId::from)
            .collect()
    }
}
