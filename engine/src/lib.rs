//! Entry point for hosts: load config, discover documents, resolve paths.
//!
//! ```no_run
//! use rulebook_engine::Rulebook;
//!
//! let rulebook = Rulebook::open(".")?;
//! let bundle = rulebook.resolve("src/main.py");
//! println!("{}", bundle.effective_text());
//! # Ok::<(), rulebook_engine::RulebookError>(())
//! ```

mod error;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub use error::RulebookError;
pub use rulebook_config::RulebookConfig;
pub use rulebook_core::{ResolvedBundle, Rule, RuleRegistry};
pub use rulebook_types::InstructionDocument;

use rulebook_core::Resolver;

/// A loaded rule set for one base directory.
///
/// Immutable after construction; share it behind an `Arc` for concurrent
/// lookups. Call [`reload`](Self::reload) to pick up changed documents.
#[derive(Debug, Clone)]
pub struct Rulebook {
    base_dir: PathBuf,
    config: RulebookConfig,
    registry: RuleRegistry,
}

impl Rulebook {
    /// Reads the config for `base_dir`, then discovers and loads its documents.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self, RulebookError> {
        let base_dir = base_dir.into();
        let config = RulebookConfig::load_for(&base_dir)?;
        Self::open_with(base_dir, config)
    }

    pub fn open_with(
        base_dir: impl Into<PathBuf>,
        config: RulebookConfig,
    ) -> Result<Self, RulebookError> {
        let base_dir = base_dir.into();
        let documents = rulebook_loader::discover(&base_dir, &config.discovery)?;
        Self::from_documents(base_dir, documents, config)
    }

    /// Builds a rulebook from documents the caller already loaded.
    pub fn from_documents<I>(
        base_dir: impl Into<PathBuf>,
        documents: I,
        config: RulebookConfig,
    ) -> Result<Self, RulebookError>
    where
        I: IntoIterator,
        I::Item: Into<InstructionDocument>,
    {
        let registry = RuleRegistry::load(documents, &config.registry_options())?;
        Ok(Self {
            base_dir: absolute_base(base_dir.into()),
            config,
            registry,
        })
    }

    /// Rediscovers documents with the same base directory and config.
    pub fn reload(&self) -> Result<Self, RulebookError> {
        tracing::debug!(base = %self.base_dir.display(), "Reloading instruction rules");
        Self::open_with(self.base_dir.clone(), self.config.clone())
    }

    /// Resolves `path`. Absolute paths under the base directory are made
    /// relative first so directory patterns line up.
    #[must_use]
    pub fn resolve(&self, path: &str) -> ResolvedBundle {
        let relative = self.relative_to_base(path);
        Resolver::new(&self.registry).resolve(&relative)
    }

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

    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &RulebookConfig {
        &self.config
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn relative_to_base<'a>(&self, path: &'a str) -> Cow<'a, str> {
        let candidate = Path::new(path);
        if !candidate.is_absolute() {
            return Cow::Borrowed(path);
        }
        match candidate.strip_prefix(&self.base_dir) {
            Ok(relative) => Cow::Owned(relative.to_string_lossy().into_owned()),
            Err(_) => Cow::Borrowed(path),
        }
    }
}

/// Absolute form of `base_dir`, so absolute lookup paths can be stripped
/// against it. Keeps the path as given if the working directory is unavailable.
fn absolute_base(base_dir: PathBuf) -> PathBuf {
    if base_dir.is_absolute() {
        return base_dir;
    }
    match std::path::absolute(&base_dir) {
        Ok(absolute) => absolute,
        Err(err) => {
            tracing::warn!(
                base = %base_dir.display(),
                "Failed to make base directory absolute: {err}"
            );
            base_dir
        }
    }
}
