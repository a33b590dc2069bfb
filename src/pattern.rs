//! Restricted name-matching patterns.
//!
//! Filter strings arrive from shell aliases and CI parameters, so they are
//! deliberately narrowed to plain substring matching: no regex engine is ever
//! constructed from user input, which rules out catastrophic backtracking and
//! arbitrary-regex injection outright.

use anyhow::Result;

/// Maximum accepted pattern length.
const MAX_PATTERN_LEN: usize = 100;

/// Characters with special meaning in regex syntax. Their presence means the
/// caller expected regex semantics we refuse to provide.
const REGEX_METACHARACTERS: &[char] = &[
    '\\', '^', '$', '.', '*', '+', '?', '(', ')', '[', ']', '{', '}', '|',
];

/// A validated, case-sensitive substring filter for repository and branch
/// names. Construction is the only place validation happens; once built, a
/// pattern is safe to apply anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern(String);

impl NamePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        // The limit is in characters, not bytes; multibyte names count the
        // same as ASCII ones.
        let char_count = pattern.chars().count();
        if char_count > MAX_PATTERN_LEN {
            anyhow::bail!(
                "Pattern too long ({char_count} characters, max {MAX_PATTERN_LEN})"
            );
        }

        if let Some(c) = pattern.chars().find(|c| REGEX_METACHARACTERS.contains(c)) {
            anyhow::bail!(
                "Pattern contains unsupported character '{c}': patterns are plain substrings, not regular expressions"
            );
        }

        Ok(Self(pattern.to_string()))
    }

    /// Case-sensitive substring containment. The empty pattern matches
    /// every name.
    pub fn matches(&self, name: &str) -> bool {
        name.contains(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for NamePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
