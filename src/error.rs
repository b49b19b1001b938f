use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Failed to connect to browser: {0}")]
    Connect(String),

    #[error("No prompt input found, tried selectors: {0}")]
    InputNotFound(String),

    #[error("No response captured before the wait deadline")]
    NoResponse,

    #[error("CDP error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("Other error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RunnerError>;

impl RunnerError {
    /// Process exit code reported for this failure kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunnerError::Connect(_) => 3,
            _ => 2,
        }
    }
}
