//! Precondition failures that stop a render before it starts.

use orb_core::MaterialId;
use thiserror::Error;

/// Errors raised while validating a world or setting up a camera.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Primitive {primitive} references missing material {material}")]
    MissingMaterial { primitive: usize, material: MaterialId },

    #[error("Material {material} has invalid refractive index {value} (must be > 0)")]
    InvalidRefractiveIndex { material: MaterialId, value: f64 },

    #[error("Material {material} has albedo component outside [0, 1]")]
    InvalidAlbedo { material: MaterialId },

    #[error("Material {material} has non-finite fuzz")]
    InvalidFuzz { material: MaterialId },

    #[error("Primitive {primitive} has a zero or non-finite radius, or a non-finite center")]
    DegenerateSphere { primitive: usize },

    #[error("Image width must be at least 1 pixel")]
    InvalidImageWidth,

    #[error("Invalid aspect ratio {0} (must be finite and > 0)")]
    InvalidAspectRatio(f64),

    #[error("Image {width}x{height} exceeds the {max} pixel limit per side")]
    ImageTooLarge { width: u32, height: u32, max: u32 },

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Invalid vertical field of view {0} (must be in (0, 180) degrees)")]
    InvalidFieldOfView(f64),

    #[error("Invalid focus distance {0} (must be finite and > 0)")]
    InvalidFocusDistance(f64),

    #[error("Camera basis is degenerate (look_from == look_at, or vup parallel to view)")]
    DegenerateViewBasis,
}

/// Result type for render setup.
pub type RenderResult<T> = Result<T, RenderError>;
