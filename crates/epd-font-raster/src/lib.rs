//! epd-font-raster: font files as glyph sources for `epd-font-core`.
//!
//! - [`FontdueSource`]: fontdue rasterization at a point size and DPI
//! - [`load_font_stack`]: open a prioritized list of font files
//! - [`scan_coverage`]: collapse a font's character map into intervals

pub mod coverage;
pub mod source;

pub use coverage::{collapse_runs, scan_coverage};
pub use source::{FontdueSource, load_font_stack, pixels_per_em};
