//! Load-time error taxonomy.
//!
//! Every failure happens while building a registry. Resolution itself is total.

use std::fmt;

use thiserror::Error;

use crate::ids::RuleId;

/// A pattern field that cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern field '{field}' contains an empty pattern")]
    Empty { field: String },
    #[error("invalid glob '{pattern}': {reason}")]
    Invalid { pattern: String, reason: String },
}

/// Strict-mode conflict: one exact pattern claimed by two documents with
/// different bodies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pattern '{pattern}' in {second} conflicts with {first}")]
pub struct DuplicatePatternError {
    pub pattern: String,
    pub first: RuleId,
    pub second: RuleId,
}

/// A single document that was refused by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("{document}: {error}")]
    Pattern {
        document: RuleId,
        #[source]
        error: PatternError,
    },
    #[error(transparent)]
    DuplicatePattern(#[from] DuplicatePatternError),
}

impl LoadError {
    /// The document that was refused.
    #[must_use]
    pub fn document(&self) -> &RuleId {
        match self {
            Self::Pattern { document, .. } => document,
            Self::DuplicatePattern(dup) => &dup.second,
        }
    }
}

/// Every error found during one load, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadErrors(Vec<LoadError>);

impl LoadErrors {
    #[must_use]
    pub fn new(errors: Vec<LoadError>) -> Self {
        Self(errors)
    }

    #[must_use]
    pub fn errors(&self) -> &[LoadError] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<LoadError> {
        self.0
    }
}

impl fmt::Display for LoadErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instruction document(s) failed to load", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n- {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadErrors {}

impl IntoIterator for LoadErrors {
    type Item = LoadError;
    type IntoIter = std::vec::IntoIter<LoadError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{DuplicatePatternError, LoadError, LoadErrors, PatternError};
    use crate::RuleId;

    #[test]
    fn load_errors_display_lists_every_document() {
        let errors = LoadErrors::new(vec![
            LoadError::Pattern {
                document: RuleId::new("a.md"),
                error: PatternError::Empty {
                    field: String::new(),
                },
            },
            LoadError::DuplicatePattern(DuplicatePatternError {
                pattern: "*.py".to_string(),
                first: RuleId::new("a.md"),
                second: RuleId::new("b.md"),
            }),
        ]);
        let rendered = errors.to_string();
        assert!(rendered.starts_with("2 instruction document(s) failed to load"));
        assert!(rendered.contains("a.md: pattern field '' contains an empty pattern"));
        assert!(rendered.contains("pattern '*.py' in b.md conflicts with a.md"));
    }

    #[test]
    fn duplicate_error_blames_the_later_document() {
        let err = LoadError::from(DuplicatePatternError {
            pattern: "*.rs".to_string(),
            first: RuleId::new("first"),
            second: RuleId::new("second"),
        });
        assert_eq!(err.document().as_str(), "second");
    }
}
