//! Rasterizer capability and prioritized font stacks.

use crate::error::{FontConvertError, Result};

/// Resolution of the target e-paper panel, in dots per inch.
pub const DEFAULT_DPI: f32 = 150.0;

/// Coverage bitmap and metrics for one code point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RasterizedGlyph {
    pub width: u32,
    pub height: u32,
    /// Row-major coverage, `width * height` samples (0 = background, 255 = ink).
    pub coverage: Vec<u8>,
    /// Horizontal advance in 26.6 fixed-point.
    pub advance_x: i32,
    /// Pixels from the pen position to the bitmap's left edge.
    pub bearing_left: i32,
    /// Pixels from the baseline up to the bitmap's top edge.
    pub bearing_top: i32,
}

/// Font-wide metrics at the rendered size, in 26.6 fixed-point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeMetrics {
    pub ascender: i32,
    /// Negative below the baseline.
    pub descender: i32,
    /// Baseline-to-baseline distance.
    pub height: i32,
}

/// A font that can rasterize code points at a fixed size.
///
/// Implementations are tried in priority order by [`FontStack`].
pub trait GlyphSource {
    /// Whether the font maps `code_point` to a real (non-zero) glyph.
    fn has(&self, code_point: u32) -> bool;

    /// Render the glyph for `code_point`.
    ///
    /// Only called after [`GlyphSource::has`] returned `true`.
    fn rasterize(&self, code_point: u32) -> Result<RasterizedGlyph>;

    /// Font-wide size metrics at the rendered size.
    fn size_metrics(&self) -> SizeMetrics;
}

/// Ordered list of glyph sources, highest priority first.
#[derive(Default)]
pub struct FontStack {
    sources: Vec<Box<dyn GlyphSource>>,
}

impl FontStack {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Append a source below every source already in the stack.
    pub fn push(&mut self, source: Box<dyn GlyphSource>) {
        self.sources.push(source);
    }

    pub fn with_source(mut self, source: impl GlyphSource + 'static) -> Self {
        self.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Find the highest-priority source containing `code_point`.
    ///
    /// Every step down the stack is reported as a fallback.
    pub fn locate(&self, code_point: u32) -> Result<(usize, &dyn GlyphSource)> {
        for (index, source) in self.sources.iter().enumerate() {
            if index > 0 {
                log::warn!(
                    "falling back to font {index} for {}.",
                    display_char(code_point)
                );
            }
            if source.has(code_point) {
                return Ok((index, source.as_ref()));
            }
        }
        Err(FontConvertError::GlyphNotFound(code_point))
    }

    /// Rasterize `code_point` with the first source that contains it.
    pub fn rasterize(&self, code_point: u32) -> Result<RasterizedGlyph> {
        let (_, source) = self.locate(code_point)?;
        source.rasterize(code_point)
    }

    /// Size metrics of the source that would render `code_point`.
    pub fn size_metrics_for(&self, code_point: u32) -> Result<SizeMetrics> {
        let (_, source) = self.locate(code_point)?;
        Ok(source.size_metrics())
    }
}

/// Printable form of a code point for diagnostics.
pub(crate) fn display_char(code_point: u32) -> String {
    match char::from_u32(code_point) {
        Some(ch) if !ch.is_control() => ch.to_string(),
        _ => format!("U+{code_point:04X}"),
    }
}
