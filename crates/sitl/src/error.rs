/// Errors that can occur while setting up a simulated walk.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Scenario parse error: {0}")]
    Scenario(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
