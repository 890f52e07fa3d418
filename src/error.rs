use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum WheelError {
    #[error("invalid parameter {name}: {value} (must be finite and non-negative)")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("reading log {}: {}", .path.display(), .source)]
    ReadingLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WheelResult<T> = Result<T, WheelError>;
