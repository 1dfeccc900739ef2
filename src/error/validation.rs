use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[error("Unknown mode '{value}'. Run `sweepbench modes` for the list.")]
    UnknownShowMode { value: String },
}
