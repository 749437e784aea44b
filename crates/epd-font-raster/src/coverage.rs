//! Character map coverage of a font, as code point intervals.

use std::path::Path;

use epd_font_core::{CodePointInterval, FontConvertError, Result};
use swash::FontRef;

/// Highest code point considered by [`scan_coverage`] (end of the BMP).
pub const SCAN_LIMIT: u32 = 0xFFFF;

/// List the BMP code points a font file maps to real glyphs, as intervals.
pub fn scan_coverage(path: impl AsRef<Path>) -> Result<Vec<CodePointInterval>> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| FontConvertError::FontLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let font = FontRef::from_index(&data, 0).ok_or_else(|| FontConvertError::FontLoad {
        path: path.to_path_buf(),
        reason: "invalid font data".to_string(),
    })?;

    let mut code_points = Vec::new();
    font.charmap().enumerate(|code_point, glyph_id| {
        if glyph_id != 0 && code_point <= SCAN_LIMIT {
            code_points.push(code_point);
        }
    });
    code_points.sort_unstable();
    code_points.dedup();
    log::debug!("{} maps {} code points", path.display(), code_points.len());

    Ok(collapse_runs(&code_points))
}

/// Collapse sorted, distinct code points into maximal consecutive runs.
pub fn collapse_runs(code_points: &[u32]) -> Vec<CodePointInterval> {
    let mut runs: Vec<CodePointInterval> = Vec::new();
    for &cp in code_points {
        match runs.last_mut() {
            Some(run) if run.end + 1 == cp => run.end = cp,
            _ => runs.push(CodePointInterval::new(cp, cp)),
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_code_points_merge() {
        let runs = collapse_runs(&[0x20, 0x21, 0x22, 0x41, 0x43, 0x44]);
        assert_eq!(
            runs,
            vec![
                CodePointInterval::new(0x20, 0x22),
                CodePointInterval::new(0x41, 0x41),
                CodePointInterval::new(0x43, 0x44),
            ]
        );
    }

    #[test]
    fn no_code_points_no_runs() {
        assert!(collapse_runs(&[]).is_empty());
    }

    #[test]
    fn unreadable_font_is_reported() {
        let err = scan_coverage("/nonexistent/font.otf").unwrap_err();
        assert!(matches!(err, FontConvertError::FontLoad { .. }));
    }
}
