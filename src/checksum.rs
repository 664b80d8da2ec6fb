//! Fingerprints for rendered fixtures
//!
//! Fixture suites can pin a generated table by its SHA-256 instead of
//! checking in the whole text.

use sha2::{Digest, Sha256};
use std::fmt;

/// SHA256 checksum of rendered output
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum(String);

impl Checksum {
    /// Compute checksum from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Compute checksum from rendered text
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verify that rendered text matches this checksum
    pub fn verify(&self, content: &str) -> bool {
        Self::from_str(content) == *self
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Checksum {
    fn from(s: String) -> Self {
        Self(s.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // sha256 of the empty string
        assert_eq!(
            Checksum::from_str("").as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_verification() {
        let table = "2764 FE0F ; emoji ; # heart\n#EOF\n";
        let checksum = Checksum::from_str(table);
        assert!(checksum.verify(table));
        assert!(!checksum.verify("2764 FE0E ; text ; # heart\n#EOF\n"));
    }

    #[test]
    fn test_pinned_checksums_are_case_insensitive() {
        let pinned = Checksum::from(
            "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855".to_string(),
        );
        assert!(pinned.verify(""));
    }
}
