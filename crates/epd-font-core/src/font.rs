//! Complete font table: glyph blob, records, interval index and font metrics.

use crate::compress::GlyphCompression;
use crate::error::{FontConvertError, Result};
use crate::fixed;
use crate::index::{IntervalIndexEntry, build_interval_index};
use crate::interval::CodePointInterval;
use crate::pack::{PixelMode, packed_len};
use crate::raster::{FontStack, SizeMetrics};
use crate::table::{GlyphRecord, GlyphTable, build_glyph_table};

/// Code point whose font supplies the table's line metrics.
///
/// The pipe reaches close to the real descender in most fonts.
pub const DEFAULT_METRICS_REFERENCE: char = '|';

/// Settings shared by every glyph of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontTableOptions {
    pub mode: PixelMode,
    pub compression: GlyphCompression,
    pub metrics_reference: u32,
}

impl Default for FontTableOptions {
    fn default() -> Self {
        Self {
            mode: PixelMode::FourBitGray,
            compression: GlyphCompression::Disabled,
            metrics_reference: DEFAULT_METRICS_REFERENCE as u32,
        }
    }
}

/// Font-level record of the emitted table, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetricsRecord {
    pub interval_count: u32,
    pub compressed: bool,
    pub line_height: i32,
    pub ascender: i32,
    pub descender: i32,
}

impl FontMetricsRecord {
    pub fn new(size: SizeMetrics, interval_count: u32, compressed: bool) -> Self {
        Self {
            interval_count,
            compressed,
            line_height: fixed::ceil(size.height),
            ascender: fixed::ceil(size.ascender),
            descender: fixed::floor(size.descender),
        }
    }
}

/// Everything needed to emit one font.
#[derive(Debug, Clone)]
pub struct FontTable {
    /// Identifier prefix of the emitted symbols.
    pub name: String,
    pub glyphs: GlyphTable,
    pub intervals: Vec<IntervalIndexEntry>,
    pub metrics: FontMetricsRecord,
    pub options: FontTableOptions,
}

impl FontTable {
    /// Build the full table for `intervals` from `fonts`.
    ///
    /// `intervals` must be sorted and disjoint, as produced by
    /// [`crate::build_interval_set`].
    pub fn build(
        name: impl Into<String>,
        intervals: &[CodePointInterval],
        fonts: &FontStack,
        options: FontTableOptions,
    ) -> Result<Self> {
        let glyphs = build_glyph_table(intervals, fonts, options.mode, options.compression)?;
        let size = fonts.size_metrics_for(options.metrics_reference)?;
        let metrics = FontMetricsRecord::new(
            size,
            intervals.len() as u32,
            options.compression.is_enabled(),
        );

        Ok(Self {
            name: name.into(),
            glyphs,
            intervals: build_interval_index(intervals),
            metrics,
            options,
        })
    }

    /// Look up a code point through the interval index.
    ///
    /// Returns the glyph's position in the record array and the record.
    pub fn glyph(&self, code_point: u32) -> Option<(usize, &GlyphRecord)> {
        let index = self
            .intervals
            .iter()
            .find_map(|entry| entry.glyph_index(code_point))?;
        self.glyphs.glyphs.get(index).map(|record| (index, record))
    }

    /// Packed (uncompressed) bitmap of a glyph, `ceil(width / 2) * height` bytes.
    pub fn glyph_bitmap(&self, record: &GlyphRecord) -> Result<Vec<u8>> {
        let corrupt = |reason: String| FontConvertError::CorruptGlyphData {
            offset: record.data_offset,
            reason,
        };

        let data = self
            .glyphs
            .bitmaps
            .get(record.data_range())
            .ok_or_else(|| corrupt(format!("range {:?} is outside the blob", record.data_range())))?;
        let expected = packed_len(record.width, record.height);
        let packed = self
            .options
            .compression
            .decompress(data, expected)
            .map_err(|e| corrupt(e.to_string()))?;
        if packed.len() != expected {
            return Err(corrupt(format!(
                "expected {expected} packed bytes, got {}",
                packed.len()
            )));
        }
        Ok(packed)
    }
}
