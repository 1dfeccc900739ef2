mod app;
mod client;
mod config;
mod env;
mod remote;
mod store;
mod validation;

pub use app::{AppError, AppResult};
pub use client::ClientError;
pub use config::ConfigError;
pub use env::EnvError;
pub use remote::RemoteError;
pub use store::StoreError;
pub use validation::ValidationError;
