use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a Case within its topic's list
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    /// Creates a new `CaseId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the id is empty or only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CaseId({})", self.0)
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CaseId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CaseId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl FromStr for CaseId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_id_display() {
        let id = CaseId::new("BSB-01");
        assert_eq!(id.to_string(), "BSB-01");
        assert_eq!(format!("{id:?}"), "CaseId(BSB-01)");
    }

    #[test]
    fn test_case_id_blank() {
        assert!(CaseId::new("   ").is_blank());
        assert!(!CaseId::new("x").is_blank());
    }

    #[test]
    fn test_case_id_serializes_as_plain_string() {
        let ids = vec![CaseId::new("a"), CaseId::new("b")];
        let json = serde_json::to_string(&ids).unwrap();
        assert_eq!(json, r#"["a","b"]"#);

        let back: Vec<CaseId> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ids);
    }
}
