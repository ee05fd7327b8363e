//! Error types for engine and host operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for engine and host operations
///
/// Start-time failures (`SeedOutOfBounds`, `UnknownAlgorithm`) mean no
/// run began and nothing was mutated; the remaining variants are host
/// I/O failures. None of them is fatal to the process and none is
/// retried.
#[derive(Debug)]
pub enum EngineError {
    /// Seed coordinate lies outside the grid
    SeedOutOfBounds {
        /// The rejected seed as `[x, y]`
        seed: [i32; 2],
        /// Grid width in cells
        width: usize,
        /// Grid height in cells
        height: usize,
    },

    /// Requested algorithm name is not recognised
    UnknownAlgorithm {
        /// The name that failed to parse
        name: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Visualization export was requested but no frames were captured
    NoFramesCaptured,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeedOutOfBounds {
                seed,
                width,
                height,
            } => {
                write!(
                    f,
                    "Seed ({}, {}) is outside the {width}x{height} grid",
                    seed[0], seed[1]
                )
            }
            Self::UnknownAlgorithm { name } => {
                write!(f, "Unknown algorithm '{name}'")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::NoFramesCaptured => {
                write!(f, "No frames were captured for visualization")
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Convenience type alias for engine results
pub type Result<T> = std::result::Result<T, EngineError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> EngineError {
    EngineError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_error_formatting() {
        let err = EngineError::SeedOutOfBounds {
            seed: [-1, 7],
            width: 10,
            height: 20,
        };
        assert_eq!(err.to_string(), "Seed (-1, 7) is outside the 10x20 grid");
    }

    #[test]
    fn test_unknown_algorithm_formatting() {
        let err = EngineError::UnknownAlgorithm {
            name: "spiral".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown algorithm 'spiral'");
    }
}
