//! Error types for font table conversion.

use std::path::PathBuf;

use thiserror::Error;

use crate::interval::CodePointInterval;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, FontConvertError>;

/// Errors that abort a conversion run.
#[derive(Error, Debug)]
pub enum FontConvertError {
    /// No font in the stack maps the code point.
    #[error("code point {0:#04x} not found in font stack")]
    GlyphNotFound(u32),

    /// An additional interval argument could not be parsed.
    #[error("invalid interval '{spec}': {reason}")]
    InvalidInterval { spec: String, reason: String },

    /// Two intervals of the merged set share at least one code point.
    #[error("interval {first} overlaps interval {second}")]
    OverlappingIntervals {
        first: CodePointInterval,
        second: CodePointInterval,
    },

    /// Point size and resolution do not give a positive pixel size.
    #[error("invalid render size {size_pt}pt at {dpi} dpi")]
    InvalidPixelSize { size_pt: f32, dpi: f32 },

    /// A font source could not be opened or parsed.
    #[error("failed to load font {}: {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },

    /// Glyph bytes in the blob do not decode to the expected bitmap.
    #[error("corrupt glyph data at offset {offset}: {reason}")]
    CorruptGlyphData { offset: u32, reason: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
