use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StudioError {
    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("palette has {0} entries, the maximum is 256")]
    PaletteTooLarge(usize),

    #[error("source or target dimensions cannot be zero")]
    ZeroDimension,

    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error("allowed brick widths cannot be empty")]
    EmptyWidths,

    #[error("allowed brick width must be positive, got {0}")]
    InvalidWidth(u32),

    #[error("glyph rows mismatch: expected {expected}, found {found}")]
    MixedGlyphHeight { expected: usize, found: usize },
}
