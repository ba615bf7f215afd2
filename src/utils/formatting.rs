//! Formatting utilities used for CLI and export outputs.

/// Canonical text normalization used by every matcher in the crate:
/// trim surrounding whitespace, then lowercase.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
