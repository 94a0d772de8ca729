//! Rule registry: compiles instruction documents into an ordered rule list.
//!
//! Registration order is document order. The resolver relies on it for
//! deterministic concatenation, so the registry never reorders rules.

use std::collections::HashMap;
use std::sync::Arc;

use rulebook_types::{
    DuplicatePatternError, InstructionDocument, LoadError, LoadErrors, RegistryOptions, RuleId,
};

use crate::rule::Rule;

/// Immutable, ordered set of compiled rules.
///
/// Safe to share across threads; nothing mutates after [`RuleRegistry::load`].
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<Arc<Rule>>,
    options: RegistryOptions,
}

impl RuleRegistry {
    /// Compiles every document, collecting all failures.
    ///
    /// Returns either a registry holding every document or the full list of
    /// load errors. A broken document never silently disappears from an
    /// otherwise successful load.
    pub fn load<I>(documents: I, options: &RegistryOptions) -> Result<Self, LoadErrors>
    where
        I: IntoIterator,
        I::Item: Into<InstructionDocument>,
    {
        let mut rules: Vec<Arc<Rule>> = Vec::new();
        let mut errors = Vec::new();
        // Exact pattern string -> index of the first rule that declared it.
        let mut claimed: HashMap<String, usize> = HashMap::new();

        for (index, document) in documents.into_iter().enumerate() {
            let document: InstructionDocument = document.into();
            let (id, field, body) = document.into_parts(index);

            let rule = match Rule::compile(id.clone(), &field, body, &options.matching) {
                Ok(rule) => rule,
                Err(error) => {
                    tracing::warn!(
                        rule = %id,
                        field = %field,
                        "Rejected instruction document ({error})"
                    );
                    errors.push(LoadError::Pattern {
                        document: id,
                        error,
                    });
                    continue;
                }
            };

            if options.strict {
                if let Some(conflict) = find_conflict(&claimed, &rules, &rule) {
                    tracing::warn!(
                        rule = %rule.id(),
                        pattern = %conflict.pattern,
                        first = %conflict.first,
                        "Rejected instruction document with conflicting pattern"
                    );
                    errors.push(conflict.into());
                    continue;
                }
                for pattern in rule.patterns().patterns() {
                    claimed
                        .entry(pattern.as_str().to_string())
                        .or_insert(rules.len());
                }
            }

            tracing::debug!(
                rule = %rule.id(),
                patterns = rule.patterns().len(),
                "Registered instruction rule"
            );
            rules.push(Arc::new(rule));
        }

        if !errors.is_empty() {
            return Err(LoadErrors::new(errors));
        }

        tracing::info!(
            count = rules.len(),
            strict = options.strict,
            "Loaded instruction rules"
        );
        Ok(Self {
            rules,
            options: *options,
        })
    }

    /// Every rule in registration order.
    #[must_use]
    pub fn all_rules(&self) -> &[Arc<Rule>] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Rule>> {
        self.rules.iter()
    }

    /// First rule registered under `id`.
    #[must_use]
    pub fn get(&self, id: &RuleId) -> Option<&Arc<Rule>> {
        self.rules.iter().find(|rule| rule.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }
}

/// Finds the first pattern of `candidate` already claimed by a rule with a
/// different body.
fn find_conflict(
    claimed: &HashMap<String, usize>,
    rules: &[Arc<Rule>],
    candidate: &Rule,
) -> Option<DuplicatePatternError> {
    candidate.patterns().patterns().iter().find_map(|pattern| {
        let first = &rules[*claimed.get(pattern.as_str())?];
        (first.body() != candidate.body()).then(|| DuplicatePatternError {
            pattern: pattern.as_str().to_string(),
            first: first.id().clone(),
            second: candidate.id().clone(),
        })
    })
}
