//! Error types for chakra-drive

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// chakra-drive error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file parse error
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file serialize error
    #[error("Configuration serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Invalid parameter rejected at construction time
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Actuator failure reported by a motor pair implementation
    #[error("Actuator error: {0}")]
    Actuator(String),
}
