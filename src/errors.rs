use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a failure, used by callers to decide between a client-side complaint
/// (bad code, empty table) and an internal fault (unreadable file, broken config).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorClass {
    Client,
    Internal,
}

#[derive(Error, Debug)]
pub enum AirfoilError {
    #[error("Invalid NACA code '{code}', must be exactly 4 digits")]
    InvalidCode { code: String },

    #[error("Invalid point count {count}, must be at least 1")]
    InvalidPointCount { count: usize },

    #[error("No valid coordinate data found")]
    NoCoordinateData,

    #[error("Unknown output format '{value}', expected 'standard' or 'solidworks'")]
    InvalidFormat { value: String },

    #[error("Unknown surface split '{value}', expected 'midpoint' or 'chord'")]
    InvalidSplit { value: String },

    #[error("IO error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AirfoilError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AirfoilError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            AirfoilError::InvalidCode { .. }
            | AirfoilError::InvalidPointCount { .. }
            | AirfoilError::NoCoordinateData
            | AirfoilError::InvalidFormat { .. }
            | AirfoilError::InvalidSplit { .. } => ErrorClass::Client,
            AirfoilError::Io { .. } | AirfoilError::Config { .. } | AirfoilError::Json(_) => {
                ErrorClass::Internal
            }
        }
    }

    /// A short message suitable for showing to whoever submitted the input
    pub fn user_message(&self) -> String {
        match self {
            AirfoilError::InvalidCode { .. } => "Invalid NACA code. Must be 4 digits.".to_string(),
            AirfoilError::NoCoordinateData => {
                "No valid coordinate data found in the airfoil surface section".to_string()
            }
            AirfoilError::Io { path, .. } => format!("Could not access '{}'", path.display()),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AirfoilError>;
