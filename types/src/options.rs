//! Matching and registry options.
//!
//! These are plain data; the config crate deserializes them from TOML and the
//! core crate consumes them.

use serde::Deserialize;

// Default value function for serde (bool::default() is false, so only true needs a fn)
const fn default_true() -> bool {
    true
}

/// How a compiled pattern compares against a path.
///
/// Case-sensitive matching is the default. Windows and default macOS file
/// systems are case-insensitive in practice, so hosts on those platforms
/// usually want `case_sensitive = false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MatchOptions {
    #[serde(default = "default_true")]
    pub case_sensitive: bool,
    /// Match separator-free patterns (e.g. `*.py`) against the file name only.
    #[serde(default = "default_true")]
    pub match_basename: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            match_basename: true,
        }
    }
}

impl MatchOptions {
    #[must_use]
    pub fn case_insensitive() -> Self {
        Self {
            case_sensitive: false,
            ..Self::default()
        }
    }
}

/// Options applied while loading documents into a registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Reject documents whose patterns collide with an earlier document that
    /// has a different body.
    pub strict: bool,
    pub matching: MatchOptions,
}

impl RegistryOptions {
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_matching(mut self, matching: MatchOptions) -> Self {
        self.matching = matching;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchOptions, RegistryOptions};

    #[test]
    fn defaults_are_case_sensitive_and_lenient() {
        let opts = RegistryOptions::default();
        assert!(!opts.strict);
        assert!(opts.matching.case_sensitive);
        assert!(opts.matching.match_basename);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let opts: MatchOptions = toml::from_str("").unwrap();
        assert_eq!(opts, MatchOptions::default());
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let opts: MatchOptions = toml::from_str("case_sensitive = false").unwrap();
        assert!(!opts.case_sensitive);
        assert!(opts.match_basename);
    }
}
