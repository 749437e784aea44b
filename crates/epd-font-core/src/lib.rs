//! epd-font-core: glyph packing and table building for e-paper bitmap fonts.
//!
//! The pipeline is strictly sequential:
//! - interval set: built-in code point ranges merged with caller ranges
//! - rasterization: a prioritized [`FontStack`] of [`GlyphSource`]s
//! - packing: 8-bit coverage to two pixels per byte ([`pack_bitmap`])
//! - glyph table: contiguous blob plus one [`GlyphRecord`] per code point
//! - interval index: cumulative glyph offsets per interval
//! - emission: a static C table ([`emit::emit_c_header`])

pub mod compress;
pub mod emit;
pub mod error;
pub mod fixed;
pub mod font;
pub mod index;
pub mod interval;
pub mod pack;
pub mod raster;
pub mod table;

pub use compress::GlyphCompression;
pub use error::{FontConvertError, Result};
pub use font::{DEFAULT_METRICS_REFERENCE, FontMetricsRecord, FontTable, FontTableOptions};
pub use index::{IntervalIndexEntry, build_interval_index};
pub use interval::{BUILTIN_INTERVALS, CodePointInterval, build_interval_set};
pub use pack::{PixelMode, pack_bitmap, packed_len};
pub use raster::{DEFAULT_DPI, FontStack, GlyphSource, RasterizedGlyph, SizeMetrics};
pub use table::{GlyphRecord, GlyphTable, build_glyph_table};
