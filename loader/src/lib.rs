//! Boundary: finds instruction documents on disk and parses them.
//!
//! All filesystem access for documents lives here. The output is a list of
//! [`InstructionDocument`](rulebook_types::InstructionDocument)s in discovery
//! order, ready for `RuleRegistry::load`.

mod discovery;
mod error;
pub mod frontmatter;

pub use discovery::{
    DEFAULT_INSTRUCTION_ROOTS, DEFAULT_INSTRUCTION_SUFFIXES, DEFAULT_MAX_DOCUMENT_BYTES,
    DiscoveryConfig, discover, load_document,
};
pub use error::DiscoveryError;
pub use frontmatter::{ParsedDocument, parse_document};
