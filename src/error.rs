use crate::actor::ActorError;
use crate::config::ConfigError;
use crate::datasource::FetchError;
use crate::domain::AmountError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Actor(#[from] ActorError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Amount(#[from] AmountError),
}
