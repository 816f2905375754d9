//! Error types and context management for generation operations

use std::fmt;
use std::path::{Path, PathBuf};

use crate::spatial::geometry::Position;
use crate::spatial::tiles::TileId;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source data doesn't meet algorithm requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
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

    /// An adjacency operation referenced a tile that is not registered
    UnknownVertex {
        /// The unregistered tile
        tile: TileId,
    },

    /// Adjacency rules and tile weights do not cover the same tiles
    MismatchedUniverse {
        /// Tiles with adjacency rules but no weight
        adjacency_only: Vec<TileId>,
        /// Tiles with a weight but no adjacency rules
        frequency_only: Vec<TileId>,
    },

    /// Tile index exceeds available tile set
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of known tiles
        max_tiles: usize,
    },

    /// A grid cell was expected to be resolved but is still open
    UnresolvedCell {
        /// Grid position of the open cell
        position: Position,
    },

    /// Generation gave up after too many contradiction restarts
    ///
    /// Only raised when a restart limit has been configured.
    RestartLimitExceeded {
        /// Restarts performed
        restarts: usize,
        /// Configured ceiling
        limit: usize,
    },

    /// Failed to save generated image to disk
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

    /// Internal computation produced an invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::UnknownVertex { tile } => {
                write!(f, "Tile {tile} is not a vertex of the adjacency model")
            }
            Self::MismatchedUniverse {
                adjacency_only,
                frequency_only,
            } => {
                write!(
                    f,
                    "Adjacency and frequency models disagree: {} tile(s) without weight, {} tile(s) without adjacency rules",
                    adjacency_only.len(),
                    frequency_only.len()
                )
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (max: {max_tiles})")
            }
            Self::UnresolvedCell { position } => {
                write!(
                    f,
                    "Cell at row {}, column {} is not resolved",
                    position[0], position[1]
                )
            }
            Self::RestartLimitExceeded { restarts, limit } => {
                write!(
                    f,
                    "Gave up after {restarts} contradiction restarts (limit {limit})"
                )
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
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Attaches the offending path to errors converted without one
pub trait WithPath<T> {
    /// Replace a placeholder path in image or file system errors
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                AlgorithmError::ImageLoad { path: slot, .. }
                | AlgorithmError::ImageExport { path: slot, .. }
                | AlgorithmError::FileSystem { path: slot, .. } => {
                    path.clone_into(slot);
                }
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
