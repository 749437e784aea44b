//! Interval index: maps code point ranges to positions in the glyph array.

use crate::interval::CodePointInterval;

/// One interval with the index of its first glyph in the glyph array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalIndexEntry {
    pub start: u32,
    pub end: u32,
    /// Number of glyphs contributed by all preceding intervals.
    pub glyph_index_offset: u32,
}

impl IntervalIndexEntry {
    /// Glyph array index of `code_point`, if this interval contains it.
    pub fn glyph_index(&self, code_point: u32) -> Option<usize> {
        self.interval()
            .contains(code_point)
            .then(|| (self.glyph_index_offset + (code_point - self.start)) as usize)
    }

    pub fn interval(&self) -> CodePointInterval {
        CodePointInterval::new(self.start, self.end)
    }
}

/// Build the index for an interval set, keeping its order.
pub fn build_interval_index(intervals: &[CodePointInterval]) -> Vec<IntervalIndexEntry> {
    intervals
        .iter()
        .scan(0u32, |offset, interval| {
            let entry = IntervalIndexEntry {
                start: interval.start,
                end: interval.end,
                glyph_index_offset: *offset,
            };
            *offset += interval.len();
            Some(entry)
        })
        .collect()
}
