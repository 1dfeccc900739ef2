use thiserror::Error;

use super::{
    ClientError, ConfigError, EnvError, RemoteError, StoreError, ValidationError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Environment error: {0}")]
    Env(#[from] EnvError),
    #[error("Result store error: {0}")]
    Store(#[from] StoreError),
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn env<E>(error: E) -> Self
    where
        E: Into<EnvError>,
    {
        error.into().into()
    }

    pub fn store<E>(error: E) -> Self
    where
        E: Into<StoreError>,
    {
        error.into().into()
    }

    pub fn remote<E>(error: E) -> Self
    where
        E: Into<RemoteError>,
    {
        error.into().into()
    }

    pub fn client<E>(error: E) -> Self
    where
        E: Into<ClientError>,
    {
        error.into().into()
    }

    /// True for errors raised before any process is started.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
