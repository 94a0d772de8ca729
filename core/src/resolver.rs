//! Resolves a path to the rules that apply to it.
//!
//! Resolution is a linear scan over the registry in registration order. It
//! holds no state, so repeated calls with the same path return identical
//! bundles.

use std::sync::Arc;

use crate::bundle::ResolvedBundle;
use crate::registry::RuleRegistry;

/// Borrowing view over a registry that answers path lookups.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    registry: &'a RuleRegistry,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub fn new(registry: &'a RuleRegistry) -> Self {
        Self { registry }
    }

    /// Collects every rule with at least one pattern matching `path`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> ResolvedBundle {
        let matched: Vec<_> = self
            .registry
            .iter()
            .filter(|rule| rule.applies_to(path))
            .map(Arc::clone)
            .collect();
        tracing::trace!(path, matched = matched.len(), "Resolved instruction rules");
        ResolvedBundle::new(path, matched)
    }

    /// Resolves each path independently, keeping input order.
    pub fn resolve_many<I, S>(&self, paths: I) -> Vec<ResolvedBundle>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .map(|path| self.resolve(path.as_ref()))
            .collect()
    }
}

/// Shorthand for `Resolver::new(registry).resolve(path)`.
#[must_use]
pub fn resolve(registry: &RuleRegistry, path: &str) -> ResolvedBundle {
    Resolver::new(registry).resolve(path)
}

#[cfg(test)]
mod tests {
    use super::{Resolver, resolve};
    use crate::bundle::{BODY_SEPARATOR, ResolvedBundle};
    use crate::registry::RuleRegistry;
    use rulebook_types::{InstructionDocument, RegistryOptions};

    fn registry(docs: Vec<InstructionDocument>) -> RuleRegistry {
        RuleRegistry::load(docs, &RegistryOptions::default()).unwrap()
    }

    #[test]
    fn overlapping_rules_apply_in_registration_order() {
        let registry = RuleRegistry::load(
            [("*.py", "PY_RULES"), ("*.py, *.ipynb", "NB_RULES")],
            &RegistryOptions::default(),
        )
        .unwrap();
        let bundle = resolve(&registry, "main.py");
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.effective_text(), "PY_RULES\n\nNB_RULES");
        insta::assert_snapshot!(bundle.effective_text(), @r"
        PY_RULES

        NB_RULES
        ");
    }

    #[test]
    fn no_match_returns_empty_bundle() {
        let registry = RuleRegistry::load(
            [("*.py", "PY_RULES"), ("*.py, *.ipynb", "NB_RULES")],
            &RegistryOptions::default(),
        )
        .unwrap();
        let bundle = resolve(&registry, "readme.md");
        assert!(bundle.is_empty());
        assert_eq!(bundle.effective_text(), "");
        assert!(bundle.sources().is_empty());
        assert_eq!(bundle.path(), "readme.md");
    }

    #[test]
    fn skipped_rules_do_not_reorder_matches() {
        let registry = registry(vec![
            InstructionDocument::new("a", "*.rs", "A"),
            InstructionDocument::new("b", "*.toml", "B"),
            InstructionDocument::new("c", "src/**", "C"),
        ]);
        let bundle = resolve(&registry, "src/lib.rs");
        let sources: Vec<&str> = bundle.sources().iter().map(|id| id.as_str()).collect();
        assert_eq!(sources, vec!["a", "c"]);
        assert_eq!(bundle.effective_text(), format!("A{BODY_SEPARATOR}C"));
    }

    #[test]
    fn resolution_is_idempotent() {
        let registry = registry(vec![
            InstructionDocument::new("web", "*.html, *.css, *.vue", "WEB"),
            InstructionDocument::new("vue", "*.vue", "VUE"),
        ]);
        let first = resolve(&registry, "components/App.vue");
        let second = resolve(&registry, "components/App.vue");
        assert_eq!(first.effective_text(), second.effective_text());
        assert_eq!(first.sources(), second.sources());
    }

    #[test]
    fn bodies_are_joined_verbatim() {
        let registry = registry(vec![
            InstructionDocument::new("one", "*.md", "line one\n"),
            InstructionDocument::new("two", "*.md", "  line two"),
        ]);
        let bundle = resolve(&registry, "README.md");
        assert_eq!(bundle.effective_text(), "line one\n\n\n  line two");
    }

    #[test]
    fn resolve_many_keeps_input_order() {
        let registry = registry(vec![InstructionDocument::new("py", "*.py", "PY")]);
        let bundles = Resolver::new(&registry).resolve_many(["a.md", "b.py"]);
        assert_eq!(bundles.len(), 2);
        assert!(bundles[0].is_empty());
        assert_eq!(bundles[1].effective_text(), "PY");
    }

    #[test]
    fn empty_registry_resolves_to_empty_bundle() {
        let registry = RuleRegistry::default();
        let bundle = resolve(&registry, "anything.rs");
        assert!(bundle.is_empty());
        assert_eq!(bundle.effective_text(), ResolvedBundle::empty("x").effective_text());
    }

    #[test]
    fn concurrent_readers_need_no_locking() {
        let registry = registry(vec![
            InstructionDocument::new("rs", "*.rs", "RUST"),
            InstructionDocument::new("src", "src/**", "SRC"),
        ]);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| resolve(&registry, "src/main.rs").into_effective_text()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), "RUST\n\nSRC");
            }
        });
    }
}
