#[derive(Debug, thiserror::Error)]
pub enum PadCycleError {
    #[error("Allocation failed: {0}")]
    Allocation(String),

    #[error("ViGEmBus connection failed: {0}")]
    Connection(String),

    #[error("Virtual controller registration failed: {0}")]
    Registration(String),

    #[error("Virtual controller update failed: {0}")]
    Update(String),

    #[error("Forwarding error: {0}")]
    Forwarding(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Platform not supported: {0}")]
    PlatformNotSupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PadCycleError>;
