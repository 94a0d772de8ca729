//! Walks instruction roots and loads every path-scoped document found.
//!
//! Discovery order is deterministic: roots in configured order, then entries
//! sorted by file name within each directory. The registry turns this order
//! into registration order.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rulebook_types::InstructionDocument;
use serde::Deserialize;

use crate::error::DiscoveryError;
use crate::frontmatter::parse_document;

/// Directories searched when no roots are configured.
pub const DEFAULT_INSTRUCTION_ROOTS: &[&str] = &[".github/instructions", ".cursor/rules"];

/// File name suffixes that mark an instruction document.
pub const DEFAULT_INSTRUCTION_SUFFIXES: &[&str] = &[".instructions.md", ".mdc"];

pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 64 * 1024;

fn default_roots() -> Vec<String> {
    DEFAULT_INSTRUCTION_ROOTS
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_suffixes() -> Vec<String> {
    DEFAULT_INSTRUCTION_SUFFIXES
        .iter()
        .map(ToString::to_string)
        .collect()
}

const fn default_max_document_bytes() -> usize {
    DEFAULT_MAX_DOCUMENT_BYTES
}

const fn default_true() -> bool {
    true
}

/// Where to look for instruction documents.
///
/// ```toml
/// [discovery]
/// roots = [".github/instructions"]
/// suffixes = [".instructions.md"]
/// max_document_bytes = 65536
/// respect_gitignore = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiscoveryConfig {
    /// Directories (or single files), relative to the base directory unless absolute.
    #[serde(default = "default_roots")]
    pub roots: Vec<String>,
    #[serde(default = "default_suffixes")]
    pub suffixes: Vec<String>,
    /// Bodies longer than this are truncated.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            suffixes: default_suffixes(),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            respect_gitignore: true,
        }
    }
}

impl DiscoveryConfig {
    fn is_instruction_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.suffixes.iter().any(|s| name.ends_with(s.as_str())))
    }
}

/// Finds and parses every instruction document under the configured roots.
///
/// Documents without a pattern declaration (prompt files, plain notes) are
/// skipped. Missing roots are skipped. The first unreadable or unparsable
/// document aborts discovery.
pub fn discover(
    base_dir: &Path,
    config: &DiscoveryConfig,
) -> Result<Vec<InstructionDocument>, DiscoveryError> {
    let mut documents = Vec::new();

    for root in &config.roots {
        let root_path = base_dir.join(root);
        if !root_path.exists() {
            tracing::debug!(root = %root_path.display(), "Instruction root not found, skipping");
            continue;
        }

        let walker = WalkBuilder::new(&root_path)
            .hidden(false)
            .parents(config.respect_gitignore)
            .ignore(config.respect_gitignore)
            .git_ignore(config.respect_gitignore)
            .git_global(config.respect_gitignore)
            .git_exclude(config.respect_gitignore)
            .filter_entry(|entry| entry.file_name() != ".git")
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry.map_err(|source| DiscoveryError::Walk {
                root: root_path.clone(),
                source,
            })?;
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let path = entry.path();
            if !config.is_instruction_file(path) {
                continue;
            }
            if let Some(document) = load_document(base_dir, path, config.max_document_bytes)? {
                documents.push(document);
            }
        }
    }

    if !documents.is_empty() {
        tracing::info!(
            count = documents.len(),
            base = %base_dir.display(),
            "Discovered instruction documents"
        );
    }
    Ok(documents)
}

/// Reads one document. Returns `None` when it declares no pattern.
pub fn load_document(
    base_dir: &Path,
    path: &Path,
    max_bytes: usize,
) -> Result<Option<InstructionDocument>, DiscoveryError> {
    let content = fs::read_to_string(path).map_err(|source| DiscoveryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_document(&content).map_err(|source| DiscoveryError::Frontmatter {
        path: path.to_path_buf(),
        source,
    })?;

    let id = document_id(base_dir, path);
    let Some(pattern_field) = parsed.pattern_field else {
        tracing::debug!(document = %id, "No applyTo/globs declaration, skipping");
        return Ok(None);
    };

    let mut body = parsed.body;
    if body.len() > max_bytes {
        tracing::warn!(
            document = %id,
            total_bytes = body.len(),
            cap = max_bytes,
            "Instruction body exceeds {max_bytes} byte cap; truncating"
        );
        body.truncate(body.floor_char_boundary(max_bytes));
    }

    Ok(Some(InstructionDocument::new(id, pattern_field, body)))
}

/// Path relative to `base_dir`, always with `/` separators.
fn document_id(base_dir: &Path, path: &Path) -> String {
    let relative: PathBuf = path.strip_prefix(base_dir).unwrap_or(path).to_path_buf();
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
