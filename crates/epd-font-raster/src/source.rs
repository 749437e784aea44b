use std::path::{Path, PathBuf};

use epd_font_core::fixed;
use epd_font_core::{FontConvertError, FontStack, GlyphSource, RasterizedGlyph, Result, SizeMetrics};

/// Pixel size of one em for a point size at a given resolution.
///
/// Zero, negative and non-finite inputs are rejected: they rasterize every
/// glyph to an empty bitmap.
pub fn pixels_per_em(size_pt: f32, dpi: f32) -> Result<f32> {
    let px = size_pt * dpi / 72.0;
    if size_pt > 0.0 && dpi > 0.0 && px.is_finite() {
        Ok(px)
    } else {
        Err(FontConvertError::InvalidPixelSize { size_pt, dpi })
    }
}

/// Font-wide metrics in 26.6, or an error for fonts without a `hhea` table.
fn size_metrics(line: Option<fontdue::LineMetrics>, path: &Path) -> Result<SizeMetrics> {
    let line = line.ok_or_else(|| FontConvertError::FontLoad {
        path: path.to_path_buf(),
        reason: "font has no horizontal line metrics".to_string(),
    })?;
    Ok(SizeMetrics {
        ascender: fixed::from_f32(line.ascent),
        // fontdue reports descent as a negative offset from the baseline.
        descender: fixed::from_f32(line.descent),
        height: fixed::from_f32(line.new_line_size),
    })
}

/// A font file rasterized with fontdue at a fixed pixel size.
pub struct FontdueSource {
    font: fontdue::Font,
    px: f32,
    metrics: SizeMetrics,
    path: PathBuf,
}

impl FontdueSource {
    /// Parse font bytes for rendering at `size_pt` points and `dpi`.
    pub fn from_bytes(bytes: &[u8], path: impl AsRef<Path>, size_pt: f32, dpi: f32) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let px = pixels_per_em(size_pt, dpi)?;
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(
            |e| FontConvertError::FontLoad {
                path: path.clone(),
                reason: e.to_string(),
            },
        )?;
        let metrics = size_metrics(font.horizontal_line_metrics(px), &path)?;

        Ok(Self {
            font,
            px,
            metrics,
            path,
        })
    }

    /// Read and parse a font file.
    pub fn from_path(path: impl AsRef<Path>, size_pt: f32, dpi: f32) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| FontConvertError::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(&bytes, path, size_pt, dpi)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pixel_size(&self) -> f32 {
        self.px
    }

    fn glyph_index(&self, code_point: u32) -> u16 {
        char::from_u32(code_point).map_or(0, |ch| self.font.lookup_glyph_index(ch))
    }
}

impl GlyphSource for FontdueSource {
    fn has(&self, code_point: u32) -> bool {
        self.glyph_index(code_point) != 0
    }

    fn rasterize(&self, code_point: u32) -> Result<RasterizedGlyph> {
        let index = self.glyph_index(code_point);
        if index == 0 {
            return Err(FontConvertError::GlyphNotFound(code_point));
        }
        let (metrics, coverage) = self.font.rasterize_indexed(index, self.px);
        Ok(RasterizedGlyph {
            width: metrics.width as u32,
            height: metrics.height as u32,
            coverage,
            advance_x: fixed::from_f32(metrics.advance_width),
            bearing_left: metrics.xmin,
            // ymin is the bitmap's bottom edge relative to the baseline.
            bearing_top: metrics.ymin + metrics.height as i32,
        })
    }

    fn size_metrics(&self) -> SizeMetrics {
        self.metrics
    }
}

/// Open every font of `paths`, highest priority first.
///
/// Any font that fails to load aborts before rasterization starts.
pub fn load_font_stack<P: AsRef<Path>>(paths: &[P], size_pt: f32, dpi: f32) -> Result<FontStack> {
    let mut stack = FontStack::new();
    for path in paths {
        let source = FontdueSource::from_path(path, size_pt, dpi)?;
        log::debug!(
            "loaded font {} at {:.2}px per em",
            source.path().display(),
            source.pixel_size()
        );
        stack.push(Box::new(source));
    }
    Ok(stack)
}
