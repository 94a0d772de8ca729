use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to walk {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        source: ignore::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid front matter in {}: {source}", path.display())]
    Frontmatter {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl DiscoveryError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Walk { root: path, .. }
            | Self::Read { path, .. }
            | Self::Frontmatter { path, .. } => path,
        }
    }
}
