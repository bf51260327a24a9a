//! Error types for the modeller core.
//!
//! Every failure here is local and recoverable. Operations that fail leave the
//! scene exactly as it was, and the surrounding application decides whether to
//! log, ignore or abort.

use thiserror::Error;

/// Main error type for the modeller core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Bounding box whose min corner is not componentwise <= its max corner
    #[error("invalid geometry: min corner {min:?} is not <= max corner {max:?}")]
    InvalidGeometry { min: [f32; 3], max: [f32; 3] },

    /// Scale factors must be finite and strictly positive
    #[error("invalid scale factor: {0}")]
    InvalidScale(f32),

    /// Ray direction with zero length (or non-finite components)
    #[error("degenerate ray: direction must be a finite, non-zero vector")]
    DegenerateRay,

    /// A matrix that has to be inverted has no inverse
    #[error("transform is not invertible")]
    SingularTransform,

    /// Failure reported by the external renderer
    #[error("render error: {0}")]
    Render(String),
}

/// Result type alias using the modeller's Error type.
pub type Result<T> = std::result::Result<T, Error>;
