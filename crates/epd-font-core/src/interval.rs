//! Code point intervals and the merged interval set.

use std::fmt;
use std::str::FromStr;

use crate::error::{FontConvertError, Result};

/// Inclusive range of Unicode code points.
///
/// Field order matters: the derived `Ord` sorts by `start`, then by `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodePointInterval {
    pub start: u32,
    pub end: u32,
}

impl CodePointInterval {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of code points covered (`end - start + 1`).
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn contains(&self, code_point: u32) -> bool {
        (self.start..=self.end).contains(&code_point)
    }

    /// Iterate every code point of the interval in ascending order.
    pub fn code_points(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }
}

impl fmt::Display for CodePointInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#X}..={:#X}", self.start, self.end)
    }
}

impl FromStr for CodePointInterval {
    type Err = FontConvertError;

    /// Parse a `"min,max"` pair. Each bound accepts decimal or a `0x`, `0o`
    /// or `0b` prefixed literal.
    fn from_str(spec: &str) -> Result<Self> {
        let invalid = |reason: String| FontConvertError::InvalidInterval {
            spec: spec.to_string(),
            reason,
        };

        let parts: Vec<&str> = spec.split(',').collect();
        let [min, max] = parts.as_slice() else {
            return Err(invalid(format!(
                "expected 'min,max', got {} value(s)",
                parts.len()
            )));
        };
        let start = parse_code_point(min).map_err(&invalid)?;
        let end = parse_code_point(max).map_err(&invalid)?;
        if start > end {
            return Err(invalid(format!("start {start:#X} is after end {end:#X}")));
        }
        Ok(Self { start, end })
    }
}

/// Parse an integer literal the way an integer with an inferred base is
/// written in source: decimal without leading zeros, or `0x`/`0o`/`0b`
/// prefixed. Single underscores may separate digits, or follow a prefix.
fn parse_code_point(text: &str) -> std::result::Result<u32, String> {
    let text = text.trim();
    let not_a_number = || format!("'{text}' is not a number");

    let lower = text.to_ascii_lowercase();
    let unsigned = lower.strip_prefix('+').unwrap_or(lower.as_str());
    let (digits, radix, prefixed) = if let Some(rest) = unsigned.strip_prefix("0x") {
        (rest, 16, true)
    } else if let Some(rest) = unsigned.strip_prefix("0o") {
        (rest, 8, true)
    } else if let Some(rest) = unsigned.strip_prefix("0b") {
        (rest, 2, true)
    } else {
        (unsigned, 10, false)
    };

    let well_formed = !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !digits.contains("__")
        && !digits.ends_with('_')
        && (prefixed || !digits.starts_with('_'));
    if !well_formed {
        return Err(not_a_number());
    }

    let cleaned = digits.replace('_', "");
    if radix == 10 && cleaned.starts_with('0') && cleaned.bytes().any(|b| b != b'0') {
        return Err(format!("'{text}' has leading zeros; use a 0o prefix for octal"));
    }
    u32::from_str_radix(&cleaned, radix).map_err(|e| format!("{}: {e}", not_a_number()))
}

/// Built-in coverage: common accented Latin, Cyrillic and typographic punctuation.
///
/// Sorted ascending and pairwise disjoint.
pub const BUILTIN_INTERVALS: &[CodePointInterval] = &[
    // Basic Latin, Latin-1 and Latin Extended-A/B
    CodePointInterval::new(0x20, 0x7E),
    CodePointInterval::new(0xA0, 0x17E),
    CodePointInterval::new(0x180, 0x180),
    CodePointInterval::new(0x18F, 0x18F),
    CodePointInterval::new(0x192, 0x193),
    CodePointInterval::new(0x1A0, 0x1A1),
    CodePointInterval::new(0x1AF, 0x1B0),
    CodePointInterval::new(0x1C2, 0x1C3),
    CodePointInterval::new(0x1CD, 0x1DC),
    CodePointInterval::new(0x1E2, 0x1E3),
    CodePointInterval::new(0x1E6, 0x1E7),
    CodePointInterval::new(0x1EA, 0x1EB),
    CodePointInterval::new(0x1F4, 0x1F5),
    CodePointInterval::new(0x1F8, 0x1F9),
    CodePointInterval::new(0x1FC, 0x1FD),
    CodePointInterval::new(0x218, 0x21B),
    CodePointInterval::new(0x237, 0x237),
    CodePointInterval::new(0x243, 0x243),

    // IPA extensions
    CodePointInterval::new(0x250, 0x25C),
    CodePointInterval::new(0x25E, 0x27B),
    CodePointInterval::new(0x27D, 0x27E),
    CodePointInterval::new(0x280, 0x284),
    CodePointInterval::new(0x288, 0x292),
    CodePointInterval::new(0x294, 0x295),
    CodePointInterval::new(0x298, 0x299),
    CodePointInterval::new(0x29C, 0x29D),
    CodePointInterval::new(0x29F, 0x29F),
    CodePointInterval::new(0x2A1, 0x2A2),
    CodePointInterval::new(0x2A4, 0x2A4),
    CodePointInterval::new(0x2A7, 0x2A7),

    // Cyrillic
    CodePointInterval::new(0x400, 0x486),
    CodePointInterval::new(0x489, 0x4FF),

    // Latin Extended Additional
    CodePointInterval::new(0x1E02, 0x1E03),
    CodePointInterval::new(0x1E06, 0x1E07),
    CodePointInterval::new(0x1E0A, 0x1E0F),
    CodePointInterval::new(0x1E16, 0x1E17),
    CodePointInterval::new(0x1E1E, 0x1E21),
    CodePointInterval::new(0x1E24, 0x1E25),
    CodePointInterval::new(0x1E2A, 0x1E2B),
    CodePointInterval::new(0x1E32, 0x1E3B),
    CodePointInterval::new(0x1E3E, 0x1E49),
    CodePointInterval::new(0x1E52, 0x1E53),
    CodePointInterval::new(0x1E56, 0x1E63),
    CodePointInterval::new(0x1E6A, 0x1E6F),
    CodePointInterval::new(0x1E80, 0x1E85),
    CodePointInterval::new(0x1E8E, 0x1E8F),
    CodePointInterval::new(0x1E92, 0x1E97),
    CodePointInterval::new(0x1E9E, 0x1E9E),
    CodePointInterval::new(0x1EA0, 0x1EF9),

    // General punctuation, super- and subscripts
    CodePointInterval::new(0x2007, 0x2007),
    CodePointInterval::new(0x2009, 0x200B),
    CodePointInterval::new(0x2010, 0x2016),
    CodePointInterval::new(0x2018, 0x201A),
    CodePointInterval::new(0x201C, 0x201E),
    CodePointInterval::new(0x2020, 0x2022),
    CodePointInterval::new(0x2026, 0x2026),
    CodePointInterval::new(0x202F, 0x2030),
    CodePointInterval::new(0x2032, 0x2033),
    CodePointInterval::new(0x2035, 0x2035),
    CodePointInterval::new(0x2039, 0x203A),
    CodePointInterval::new(0x203C, 0x203F),
    CodePointInterval::new(0x2044, 0x2044),
    CodePointInterval::new(0x2047, 0x2049),
    CodePointInterval::new(0x2070, 0x2071),
    CodePointInterval::new(0x2074, 0x208E),
    CodePointInterval::new(0x2094, 0x2094),

    // Currency symbols
    CodePointInterval::new(0x20A1, 0x20A1),
    CodePointInterval::new(0x20A4, 0x20A4),
    CodePointInterval::new(0x20A6, 0x20A7),
    CodePointInterval::new(0x20A9, 0x20A9),
    CodePointInterval::new(0x20AB, 0x20AC),
    CodePointInterval::new(0x20AE, 0x20AE),
    CodePointInterval::new(0x20B1, 0x20B2),
    CodePointInterval::new(0x20B4, 0x20B5),
    CodePointInterval::new(0x20B8, 0x20BA),
    CodePointInterval::new(0x20BD, 0x20BD),

    // Supplemental punctuation
    CodePointInterval::new(0x2E22, 0x2E25),
    CodePointInterval::new(0x2E3A, 0x2E3B),

    // Latin Extended-D
    CodePointInterval::new(0xA7B5, 0xA7B5),
];

/// Merge the built-in intervals with caller-supplied ones.
///
/// The result is sorted by `start` (then `end`). Overlapping intervals are
/// rejected since each code point must map to exactly one glyph index.
pub fn build_interval_set(additional: &[CodePointInterval]) -> Result<Vec<CodePointInterval>> {
    let mut intervals: Vec<CodePointInterval> = BUILTIN_INTERVALS
        .iter()
        .chain(additional)
        .copied()
        .collect();
    intervals.sort_unstable();
    validate_interval_set(&intervals)?;
    Ok(intervals)
}

/// Check that a sorted interval set is well formed and pairwise disjoint.
pub fn validate_interval_set(intervals: &[CodePointInterval]) -> Result<()> {
    if let Some(bad) = intervals.iter().find(|i| i.start > i.end) {
        return Err(FontConvertError::InvalidInterval {
            spec: bad.to_string(),
            reason: "start is after end".to_string(),
        });
    }
    for pair in intervals.windows(2) {
        if pair[1].start <= pair[0].end {
            return Err(FontConvertError::OverlappingIntervals {
                first: pair[0],
                second: pair[1],
            });
        }
    }
    Ok(())
}
