//! Glob matching for instruction pattern fields.
//!
//! A pattern field is a comma-separated list of glob alternatives
//! (`"*.html, *.css, *.vue"`). Each alternative is compiled once into a
//! [`globset::GlobMatcher`]; a path matches the field if any alternative
//! matches.
//!
//! Grammar, on top of what the glob engine provides:
//!
//! - `*` never crosses `/`. `**` does (`**/x`, `x/**`, `a/**/b`).
//! - Commas split alternatives only outside `{...}` and `[...]`, so
//!   `*.{ts,tsx}` is one alternative.
//! - Backslashes are path separators, not escapes. Patterns and paths are
//!   both normalised to `/` before matching.
//! - With [`MatchOptions::match_basename`], an alternative without `/` is
//!   matched against the final path component only. A leading `/` anchors an
//!   alternative to the whole path.

use std::borrow::Cow;

use globset::{GlobBuilder, GlobMatcher};
use rulebook_types::{MatchOptions, NonEmptyString, PatternError};

/// Which part of the path an alternative is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchScope {
    FullPath,
    FileName,
}

/// One compiled glob alternative.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: NonEmptyString,
    scope: MatchScope,
    matcher: GlobMatcher,
}

impl CompiledPattern {
    fn compile(
        field: &str,
        pattern: NonEmptyString,
        options: &MatchOptions,
    ) -> Result<Self, PatternError> {
        let normalized = normalize_separators(pattern.as_str());
        let mut glob_src: &str = strip_dot_prefix(&normalized);
        let scope = if let Some(anchored) = glob_src.strip_prefix('/') {
            glob_src = anchored;
            MatchScope::FullPath
        } else if options.match_basename && !glob_src.contains('/') {
            MatchScope::FileName
        } else {
            MatchScope::FullPath
        };
        // `./` and `/` carry no glob once stripped.
        if glob_src.is_empty() {
            return Err(PatternError::Empty {
                field: field.to_string(),
            });
        }

        let glob = GlobBuilder::new(glob_src)
            .literal_separator(true)
            .backslash_escape(false)
            .case_insensitive(!options.case_sensitive)
            .build()
            .map_err(|e| PatternError::Invalid {
                pattern: pattern.to_string(),
                reason: e.kind().to_string(),
            })?;

        Ok(Self {
            pattern,
            scope,
            matcher: glob.compile_matcher(),
        })
    }

    /// The alternative as written in the pattern field (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    #[must_use]
    pub fn scope(&self) -> MatchScope {
        self.scope
    }

    /// `path` must already be normalised (see [`normalize_path`]).
    fn is_match_normalized(&self, path: &str) -> bool {
        match self.scope {
            MatchScope::FullPath => self.matcher.is_match(path),
            MatchScope::FileName => self.matcher.is_match(file_name(path)),
        }
    }
}

/// A compiled pattern field. Never empty.
#[derive(Debug, Clone)]
pub struct PatternSet {
    field: String,
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    /// Splits `field` into alternatives and compiles each one.
    ///
    /// Fails with [`PatternError::Empty`] if the field, or any alternative in
    /// it, is empty after trimming, and with [`PatternError::Invalid`] on
    /// malformed glob syntax.
    pub fn compile(field: &str, options: &MatchOptions) -> Result<Self, PatternError> {
        let mut patterns = Vec::new();
        for alternative in split_alternatives(field) {
            let pattern = NonEmptyString::new(alternative).map_err(|_| PatternError::Empty {
                field: field.to_string(),
            })?;
            patterns.push(CompiledPattern::compile(field, pattern, options)?);
        }
        Ok(Self {
            field: field.to_string(),
            patterns,
        })
    }

    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.patterns.iter().any(|p| p.is_match_normalized(&path))
    }

    /// The pattern field as it was declared.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Matches `path` against a pattern field using default options.
///
/// Fails closed: an empty or malformed field matches nothing.
#[must_use]
pub fn matches(pattern: &str, path: &str) -> bool {
    matches_with(pattern, path, &MatchOptions::default())
}

#[must_use]
pub fn matches_with(pattern: &str, path: &str, options: &MatchOptions) -> bool {
    PatternSet::compile(pattern, options).is_ok_and(|set| set.is_match(path))
}

/// Splits a pattern field on top-level commas and trims each alternative.
///
/// Commas inside `{...}` or `[...]` belong to the glob. Empty alternatives are
/// kept so the caller can reject them.
#[must_use]
pub fn split_alternatives(field: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut brace_depth = 0usize;
    let mut in_class = false;
    let mut start = 0;

    for (idx, ch) in field.char_indices() {
        match ch {
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '{' if !in_class => brace_depth += 1,
            '}' if !in_class => brace_depth = brace_depth.saturating_sub(1),
            ',' if !in_class && brace_depth == 0 => {
                parts.push(field[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(field[start..].trim());
    parts
}

/// Converts backslashes to `/` and strips leading `./` segments.
#[must_use]
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    match normalize_separators(path) {
        Cow::Borrowed(p) => Cow::Borrowed(strip_dot_prefix(p)),
        Cow::Owned(p) => Cow::Owned(strip_dot_prefix(&p).to_string()),
    }
}

fn normalize_separators(raw: &str) -> Cow<'_, str> {
    if raw.contains('\\') {
        Cow::Owned(raw.replace('\\', "/"))
    } else {
        Cow::Borrowed(raw)
    }
}

fn strip_dot_prefix(mut path: &str) -> &str {
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    path
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
