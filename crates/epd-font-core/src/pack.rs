//! Packing of 8-bit coverage bitmaps into nibble-per-pixel rows.

/// Pixel encoding used for every glyph of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelMode {
    /// Top four bits of coverage, 16 gray levels.
    #[default]
    FourBitGray,
    /// Coverage above 128 becomes full ink (`0xF`), everything else blank.
    TwoColor,
}

impl PixelMode {
    /// Nibble value for one coverage sample.
    #[inline]
    fn nibble(self, coverage: u8) -> u8 {
        match self {
            PixelMode::FourBitGray => coverage >> 4,
            PixelMode::TwoColor => {
                if coverage > 128 {
                    0xF
                } else {
                    0
                }
            }
        }
    }
}

/// Byte length of a packed bitmap: `ceil(width / 2)` bytes per row.
pub fn packed_len(width: u32, height: u32) -> usize {
    width.div_ceil(2) as usize * height as usize
}

/// Pack a row-major coverage bitmap, two pixels per byte.
///
/// The even column goes into the low nibble and the odd column into the high
/// nibble. Rows are not padded to a common stride, but an odd-width row ends
/// with a byte holding only its last pixel (high nibble zero).
///
/// `coverage.len()` must equal `width * height`.
pub fn pack_bitmap(coverage: &[u8], width: u32, mode: PixelMode) -> Vec<u8> {
    let width = width as usize;
    if width == 0 {
        return Vec::new();
    }
    debug_assert_eq!(coverage.len() % width, 0, "coverage is not a whole number of rows");

    let height = coverage.len() / width;
    let mut packed = Vec::with_capacity(width.div_ceil(2) * height);
    for row in coverage.chunks_exact(width) {
        for pair in row.chunks(2) {
            let low = mode.nibble(pair[0]);
            let high = pair.get(1).map_or(0, |&px| mode.nibble(px));
            packed.push(low | (high << 4));
        }
    }
    packed
}
