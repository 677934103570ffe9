use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourierError {
    #[error("Cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    #[error("Malformed grid file at line {line}: {reason}")]
    MalformedGrid { line: usize, reason: String },

    #[error("Moving obstacle path must contain at least one waypoint")]
    EmptyObstaclePath,

    #[error("Invalid pace {0}: an obstacle needs at least one tick per waypoint")]
    InvalidPace(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl CourierError {
    /// Shorthand for a malformed-layout error on a 1-based line
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        CourierError::MalformedGrid {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CourierError>;
