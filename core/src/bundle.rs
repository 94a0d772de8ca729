use std::sync::Arc;

use rulebook_types::RuleId;

use crate::rule::Rule;

/// Separator placed between matched rule bodies: one blank line.
pub const BODY_SEPARATOR: &str = "\n\n";

/// The outcome of resolving one path: the matched rules in registration order
/// and their bodies joined by [`BODY_SEPARATOR`].
///
/// An empty bundle is a normal result, not an error.
#[derive(Debug, Clone)]
pub struct ResolvedBundle {
    path: String,
    matched: Vec<Arc<Rule>>,
    effective_text: String,
}

impl ResolvedBundle {
    pub(crate) fn new(path: &str, matched: Vec<Arc<Rule>>) -> Self {
        let effective_text = join_bodies(&matched);
        Self {
            path: path.to_string(),
            matched,
            effective_text,
        }
    }

    #[must_use]
    pub fn empty(path: &str) -> Self {
        Self::new(path, Vec::new())
    }

    /// The path as it was requested.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn matched_rules(&self) -> &[Arc<Rule>] {
        &self.matched
    }

    #[must_use]
    pub fn effective_text(&self) -> &str {
        &self.effective_text
    }

    #[must_use]
    pub fn into_effective_text(self) -> String {
        self.effective_text
    }

    /// Ids of the contributing rules, in the order their bodies appear.
    #[must_use]
    pub fn sources(&self) -> Vec<&RuleId> {
        self.matched.iter().map(|rule| rule.id()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.matched.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

fn join_bodies(rules: &[Arc<Rule>]) -> String {
    let capacity = rules.iter().map(|r| r.body().len()).sum::<usize>()
        + BODY_SEPARATOR.len() * rules.len().saturating_sub(1);
    let mut text = String::with_capacity(capacity);
    for (idx, rule) in rules.iter().enumerate() {
        if idx > 0 {
            text.push_str(BODY_SEPARATOR);
        }
        text.push_str(rule.body());
    }
    text
}
