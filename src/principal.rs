use serde::{Deserialize, Serialize};
use std::fmt;

// ================================
// Principal Identity
// ================================

/// Opaque identity value usable as a caller or as a registry entry.
///
/// Principals are compared by value only. No well-formedness checks are
/// applied to the inner identifier; any comparable value the host hands us
/// is a usable principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Create a principal from a host identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Principal(id.into())
    }

    /// The underlying identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(id: &str) -> Self {
        Principal(id.to_string())
    }
}

impl From<String> for Principal {
    fn from(id: String) -> Self {
        Principal(id)
    }
}
