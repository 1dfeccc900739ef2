use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("Cannot find the local benchmark tool: {path}")]
    LocalToolMissing { path: String },
    #[error("Cannot find the remote benchmark tool: {path}")]
    RemoteToolMissing { path: String },
}
