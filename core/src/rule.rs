use rulebook_types::{MatchOptions, PatternError, RuleId};

use crate::matcher::PatternSet;

/// One instruction document compiled for matching. Immutable once built.
#[derive(Debug, Clone)]
pub struct Rule {
    id: RuleId,
    patterns: PatternSet,
    body: String,
}

impl Rule {
    pub fn compile(
        id: RuleId,
        pattern_field: &str,
        body: String,
        options: &MatchOptions,
    ) -> Result<Self, PatternError> {
        let patterns = PatternSet::compile(pattern_field, options)?;
        Ok(Self { id, patterns, body })
    }

    #[must_use]
    pub fn id(&self) -> &RuleId {
        &self.id
    }

    #[must_use]
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn applies_to(&self, path: &str) -> bool {
        self.patterns.is_match(path)
    }
}

#[cfg(test)]
mod tests {
    use super::Rule;
    use rulebook_types::{MatchOptions, RuleId};

    #[test]
    fn applies_when_any_pattern_matches() {
        let rule = Rule::compile(
            RuleId::new("notebooks"),
            "*.py, *.ipynb",
            "NB_RULES".to_string(),
            &MatchOptions::default(),
        )
        .unwrap();
        assert!(rule.applies_to("main.py"));
        assert!(rule.applies_to("work/analysis.ipynb"));
        assert!(!rule.applies_to("readme.md"));
        assert_eq!(rule.body(), "NB_RULES");
        assert_eq!(rule.id().as_str(), "notebooks");
    }

    #[test]
    fn zero_patterns_cannot_compile() {
        let result = Rule::compile(
            RuleId::new("empty"),
            "",
            "body".to_string(),
            &MatchOptions::default(),
        );
        assert!(result.is_err());
    }
}
