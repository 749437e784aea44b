//! Glyph table: packed glyph blob plus per-glyph records.

use crate::compress::GlyphCompression;
use crate::error::Result;
use crate::fixed;
use crate::interval::CodePointInterval;
use crate::pack::{PixelMode, pack_bitmap};
use crate::raster::{FontStack, RasterizedGlyph};

/// Metadata for one glyph in the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRecord {
    pub width: u32,
    pub height: u32,
    /// Advance in whole pixels (26.6 value floored).
    pub advance_x: i32,
    pub left: i32,
    pub top: i32,
    /// Length of this glyph's bytes in the blob.
    pub compressed_size: u32,
    /// Start of this glyph's bytes in the blob.
    pub data_offset: u32,
    /// Source code point. Not part of the binary record.
    pub code_point: u32,
}

impl GlyphRecord {
    /// Byte range of this glyph within the blob.
    pub fn data_range(&self) -> std::ops::Range<usize> {
        let start = self.data_offset as usize;
        start..start + self.compressed_size as usize
    }
}

/// Contiguous glyph blob and its records, in ascending code point order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphTable {
    pub glyphs: Vec<GlyphRecord>,
    /// Every glyph's final bytes back to back.
    pub bitmaps: Vec<u8>,
    /// Total packed size before compression.
    pub packed_size: usize,
}

impl GlyphTable {
    /// Append one glyph; its offset is the current blob length.
    pub fn append(&mut self, code_point: u32, glyph: &RasterizedGlyph, packed_len: usize, data: &[u8]) {
        self.glyphs.push(GlyphRecord {
            width: glyph.width,
            height: glyph.height,
            advance_x: fixed::floor(glyph.advance_x),
            left: glyph.bearing_left,
            top: glyph.bearing_top,
            compressed_size: data.len() as u32,
            data_offset: self.bitmaps.len() as u32,
            code_point,
        });
        self.bitmaps.extend_from_slice(data);
        self.packed_size += packed_len;
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Final blob size, after compression.
    pub fn compressed_size(&self) -> usize {
        self.bitmaps.len()
    }
}

/// Rasterize, pack and optionally compress every code point of `intervals`.
///
/// Code points are processed in interval order, then ascending within each
/// interval, and that order fixes every `data_offset`. The first code point
/// missing from the stack aborts the build.
pub fn build_glyph_table(
    intervals: &[CodePointInterval],
    fonts: &FontStack,
    mode: PixelMode,
    compression: GlyphCompression,
) -> Result<GlyphTable> {
    let table = intervals
        .iter()
        .flat_map(CodePointInterval::code_points)
        .try_fold(GlyphTable::default(), |mut table, code_point| {
            let glyph = fonts.rasterize(code_point)?;
            let packed = pack_bitmap(&glyph.coverage, glyph.width, mode);
            let data = compression.compress(&packed)?;
            table.append(code_point, &glyph, packed.len(), &data);
            Ok::<_, crate::FontConvertError>(table)
        })?;

    log::info!("total {}", table.packed_size);
    log::info!("compressed {}", table.compressed_size());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(width: u32, height: u32, advance_x: i32) -> RasterizedGlyph {
        RasterizedGlyph {
            width,
            height,
            coverage: vec![0xFF; (width * height) as usize],
            advance_x,
            bearing_left: 1,
            bearing_top: height as i32,
        }
    }

    #[test]
    fn append_advances_offsets() {
        let mut table = GlyphTable::default();
        table.append(0x41, &glyph(3, 2, 640), 4, &[1, 2, 3, 4]);
        table.append(0x42, &glyph(0, 0, 300), 0, &[]);
        table.append(0x43, &glyph(2, 1, -1), 1, &[9]);

        let offsets: Vec<u32> = table.glyphs.iter().map(|g| g.data_offset).collect();
        assert_eq!(offsets, vec![0, 4, 4]);
        assert_eq!(table.bitmaps, vec![1, 2, 3, 4, 9]);
        assert_eq!(table.packed_size, 5);
        assert_eq!(table.glyphs[0].advance_x, 10);
        assert_eq!(table.glyphs[1].advance_x, 4);
        assert_eq!(table.glyphs[2].advance_x, -1);
        assert_eq!(table.glyphs[2].data_range(), 4..5);
    }
}
