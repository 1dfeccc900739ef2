use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Client command is empty")]
    EmptyCommand,
    #[error("Failed to run client '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Client exited with status {status:?}: {stderr}")]
    Failed { status: Option<i32>, stderr: String },
    #[error("Client output is not JSON: {source}")]
    OutputNotJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("Client output has no jobs")]
    NoJobs,
    #[error("Client output lacks '{metric}' for '{direction}'")]
    MissingMetric {
        direction: &'static str,
        metric: &'static str,
    },
}
