use thiserror::Error;

/// Errors produced by the drawing session and its collaborators.
///
/// None of these are fatal: a failing control only disables or skips its own
/// feature, the rest of the session keeps running.
#[derive(Debug, Error)]
pub enum SketchError {
    /// The color control delivered a string that is not a CSS color
    #[error("Invalid stroke color: {0:?}")]
    InvalidColor(String),

    /// The width control delivered something that is not a positive integer
    #[error("Invalid stroke width: {0:?}")]
    InvalidWidth(String),

    /// A raster surface cannot have a zero dimension
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSurface { width: u32, height: u32 },

    /// A collaborator required for the session to activate is absent
    #[error("Missing required collaborator: {0}")]
    MissingCollaborator(&'static str),

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type used throughout the crate
pub type SketchResult<T> = Result<T, SketchError>;
