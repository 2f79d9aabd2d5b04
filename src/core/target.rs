//! Target identifiers reported by `bazel query`.
//!
//! A Target is an opaque label such as `//app:server`. This crate never
//! interprets it: uniqueness is not enforced and the order is whatever the
//! query printed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A non-empty target label from one discovery run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    /// Create a target from a label, rejecting empty strings.
    pub fn new(label: impl Into<String>) -> Option<Self> {
        let label = label.into();
        if label.is_empty() {
            None
        } else {
            Some(Target(label))
        }
    }

    /// The raw label as printed by the query.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Target {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_label_rejected() {
        assert!(Target::new("").is_none());
    }

    #[test]
    fn test_label_kept_verbatim() {
        let target = Target::new("//a:a").unwrap();
        assert_eq!(target.as_str(), "//a:a");
        assert_eq!(target.to_string(), "//a:a");
        assert_eq!(serde_json::to_string(&target).unwrap(), "\"//a:a\"");
    }

    #[test]
    fn test_whitespace_label_is_not_empty() {
        // Only the empty string is excluded; everything else passes through.
        assert!(Target::new(" ").is_some());
    }
}
