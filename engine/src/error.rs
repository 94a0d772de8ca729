use rulebook_config::ConfigError;
use rulebook_loader::DiscoveryError;
use rulebook_types::LoadErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulebookError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Load(#[from] LoadErrors),
}
