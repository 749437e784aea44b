//! C header emission for the `epd_driver` font structures.

use std::fmt;

use crate::font::FontTable;

/// Hex values per line of the bitmap array.
const BYTES_PER_LINE: usize = 16;

/// Displays a [`FontTable`] as a self-contained C header.
///
/// Emits, in order: the glyph blob, the `EpdGlyph` records, the
/// `EpdUnicodeInterval` index and the top-level `EpdFont`.
pub struct CHeader<'a>(pub &'a FontTable);

impl fmt::Display for CHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.0;
        let name = table.name.as_str();
        let bitmaps = &table.glyphs.bitmaps;

        writeln!(f, "#pragma once")?;
        writeln!(f, "#include \"epd_driver.h\"")?;

        writeln!(f, "const uint8_t {name}Bitmaps[{}] = {{", bitmaps.len())?;
        for line in bitmaps.chunks(BYTES_PER_LINE) {
            write!(f, "   ")?;
            for byte in line {
                write!(f, " 0x{byte:02X},")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "}};")?;

        writeln!(f, "const EpdGlyph {name}Glyphs[] = {{")?;
        for g in &table.glyphs.glyphs {
            writeln!(
                f,
                "    {{ {}, {}, {}, {}, {}, {}, {} }}, // {}",
                g.width,
                g.height,
                g.advance_x,
                g.left,
                g.top,
                g.compressed_size,
                g.data_offset,
                comment_char(g.code_point)
            )?;
        }
        writeln!(f, "}};")?;

        writeln!(f, "const EpdUnicodeInterval {name}Intervals[] = {{")?;
        for entry in &table.intervals {
            writeln!(
                f,
                "    {{ 0x{:X}, 0x{:X}, 0x{:X} }},",
                entry.start, entry.end, entry.glyph_index_offset
            )?;
        }
        writeln!(f, "}};")?;

        let metrics = &table.metrics;
        writeln!(f, "const EpdFont {name} = {{")?;
        writeln!(f, "    {name}Bitmaps,")?;
        writeln!(f, "    {name}Glyphs,")?;
        writeln!(f, "    {name}Intervals,")?;
        writeln!(f, "    {},", metrics.interval_count)?;
        writeln!(f, "    {},", u8::from(metrics.compressed))?;
        writeln!(f, "    {},", metrics.line_height)?;
        writeln!(f, "    {},", metrics.ascender)?;
        writeln!(f, "    {},", metrics.descender)?;
        writeln!(f, "}};")
    }
}

/// Render the complete header as a string.
pub fn emit_c_header(table: &FontTable) -> String {
    CHeader(table).to_string()
}

/// Trailing comment text for a glyph record.
///
/// A backslash would splice the next line into the comment, so it gets a
/// placeholder; control characters would break the line.
fn comment_char(code_point: u32) -> String {
    match char::from_u32(code_point) {
        Some('\\') => "<backslash>".to_string(),
        Some(ch) if !ch.is_control() => ch.to_string(),
        _ => format!("U+{code_point:04X}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FontMetricsRecord, FontTableOptions};
    use crate::index::build_interval_index;
    use crate::interval::CodePointInterval;
    use crate::raster::RasterizedGlyph;
    use crate::table::GlyphTable;

    fn sample_table() -> FontTable {
        let intervals = [
            CodePointInterval::new(0x5B, 0x5C),
            CodePointInterval::new(0x410, 0x410),
        ];
        let mut glyphs = GlyphTable::default();
        let glyph = RasterizedGlyph {
            width: 2,
            height: 1,
            coverage: vec![0xFF, 0x00],
            advance_x: 640,
            bearing_left: 1,
            bearing_top: 9,
        };
        glyphs.append(0x5B, &glyph, 1, &[0x0F]);
        glyphs.append(0x5C, &glyph, 1, &[0xF0]);
        glyphs.append(0x410, &glyph, 17, &(0u8..17).collect::<Vec<_>>());

        FontTable {
            name: "Demo".to_string(),
            glyphs,
            intervals: build_interval_index(&intervals),
            metrics: FontMetricsRecord {
                interval_count: 2,
                compressed: false,
                line_height: 20,
                ascender: 15,
                descender: -5,
            },
            options: FontTableOptions::default(),
        }
    }

    #[test]
    fn emits_all_sections_in_order() {
        let header = emit_c_header(&sample_table());
        let expected = "\
#pragma once
#include \"epd_driver.h\"
const uint8_t DemoBitmaps[19] = {
    0x0F, 0xF0, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D,
    0x0E, 0x0F, 0x10,
};
const EpdGlyph DemoGlyphs[] = {
    { 2, 1, 10, 1, 9, 1, 0 }, // [
    { 2, 1, 10, 1, 9, 1, 1 }, // <backslash>
    { 2, 1, 10, 1, 9, 17, 2 }, // \u{410}
};
const EpdUnicodeInterval DemoIntervals[] = {
    { 0x5B, 0x5C, 0x0 },
    { 0x410, 0x410, 0x2 },
};
const EpdFont Demo = {
    DemoBitmaps,
    DemoGlyphs,
    DemoIntervals,
    2,
    0,
    20,
    15,
    -5,
};
";
        assert_eq!(header, expected);
    }

    #[test]
    fn comment_placeholders() {
        assert_eq!(comment_char(0x5C), "<backslash>");
        assert_eq!(comment_char(0x20), " ");
        assert_eq!(comment_char(0x7F), "U+007F");
        assert_eq!(comment_char(0xE9), "\u{E9}");
    }
}
