//! Rule resolution for path-scoped instruction documents.
//!
//! Documents are compiled once into a [`RuleRegistry`]; afterwards any number
//! of readers can [`resolve`] paths against it. This crate performs no IO;
//! discovery of documents on disk lives in `rulebook-loader`.

pub mod matcher;

mod bundle;
mod registry;
mod resolver;
mod rule;

pub use bundle::{BODY_SEPARATOR, ResolvedBundle};
pub use matcher::{CompiledPattern, MatchScope, PatternSet, matches, matches_with};
pub use registry::RuleRegistry;
pub use resolver::{Resolver, resolve};
pub use rule::Rule;
