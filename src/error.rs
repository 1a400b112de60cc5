use thiserror::Error;

/// Failures while turning the canvas into a PNG.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The embedded proportional font could not be located. Text shapes
    /// cannot be rasterized without it.
    #[error("no embedded font available for text rasterization")]
    NoFont,
    #[error("invalid embedded font data: {0}")]
    Font(#[from] ab_glyph::InvalidFont),
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
