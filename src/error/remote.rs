use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Remote command is empty")]
    EmptyCommand,
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed waiting for remote process: {source}")]
    Wait {
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to copy '{local}' to remote '{remote}': {detail}")]
    Copy {
        local: String,
        remote: String,
        detail: String,
    },
}
