//! Per-glyph compression of packed bitmaps.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::error::Result;

/// Byte-stream transform applied to every glyph independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphCompression {
    /// Packed bytes are stored verbatim.
    #[default]
    Disabled,
    /// Each glyph is a self-contained zlib stream.
    Zlib,
}

impl GlyphCompression {
    pub fn from_flag(enabled: bool) -> Self {
        if enabled { Self::Zlib } else { Self::Disabled }
    }

    pub fn is_enabled(self) -> bool {
        self != Self::Disabled
    }

    pub fn compress(self, packed: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Disabled => Ok(packed.to_vec()),
            Self::Zlib => {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(packed)?;
                Ok(encoder.finish()?)
            }
        }
    }

    /// Inverse of [`GlyphCompression::compress`].
    ///
    /// `expected_len` is the unpacked size hint from the glyph's dimensions.
    pub fn decompress(self, data: &[u8], expected_len: usize) -> Result<Vec<u8>> {
        match self {
            Self::Disabled => Ok(data.to_vec()),
            Self::Zlib => {
                let mut out = Vec::with_capacity(expected_len);
                ZlibDecoder::new(data).read_to_end(&mut out)?;
                Ok(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_is_identity() {
        let data = [0x01, 0xF0, 0x77];
        assert_eq!(GlyphCompression::Disabled.compress(&data).unwrap(), data);
        assert!(!GlyphCompression::from_flag(false).is_enabled());
    }

    #[test]
    fn zlib_stream_has_header_and_inflates() {
        let packed = vec![0u8; 300];
        let compressed = GlyphCompression::Zlib.compress(&packed).unwrap();
        assert_eq!(compressed[0], 0x78);
        assert!(compressed.len() < packed.len());

        let inflated = GlyphCompression::Zlib
            .decompress(&compressed, packed.len())
            .unwrap();
        assert_eq!(inflated, packed);
    }

    #[test]
    fn empty_glyph_still_produces_a_stream() {
        let compressed = GlyphCompression::Zlib.compress(&[]).unwrap();
        assert!(!compressed.is_empty());
        assert!(GlyphCompression::Zlib.decompress(&compressed, 0).unwrap().is_empty());
    }

    #[test]
    fn garbage_fails_to_inflate() {
        assert!(GlyphCompression::Zlib.decompress(&[0x12, 0x34], 4).is_err());
    }
}
