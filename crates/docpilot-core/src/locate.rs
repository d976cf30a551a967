//! Text location over a segmented surface.
//!
//! The surface may represent one logical document as several adjacent
//! text-bearing segments, so a target snippet can start in one segment and end
//! in another. This module flattens a segment snapshot, searches it for the
//! first exact occurrence of a target, and maps the match back onto precise
//! `(segment, local-offset)` endpoints that can anchor a replace operation.
//!
//! All public offsets are **character offsets**. The offset table is rebuilt
//! from the snapshot on every call rather than cached; the surface may have
//! mutated since the last operation, and a stale table is worse than a
//! recomputed one.
//!
//! # Example
//!
//! ```rust
//! use docpilot_core::locate::locate;
//!
//! let segments = vec!["Hello ".to_string(), "wor".to_string(), "ld".to_string()];
//! let hit = locate(&segments, "world").unwrap();
//! assert_eq!((hit.start, hit.end), (6, 11));
//! assert_eq!((hit.range.start.segment, hit.range.start.offset), (1, 0));
//! assert_eq!((hit.range.end.segment, hit.range.end.offset), (2, 2));
//! ```

use regex::Regex;
use tracing::warn;

use crate::line_index::LineIndex;
use crate::surface::{SurfacePoint, SurfaceRange};

#[derive(Debug)]
pub(crate) struct CharTable {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharTable {
    pub(crate) fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    pub(crate) fn char_count(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    pub(crate) fn char_to_byte(&self, char_offset: usize) -> usize {
        let clamped = char_offset.min(self.char_count());
        self.char_to_byte
            .get(clamped)
            .copied()
            .unwrap_or(self.text_len)
    }

    pub(crate) fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }
}

/// Per-segment cumulative-offset table over a flattened segment snapshot.
///
/// Maps between flat character offsets and `(segment, local-offset)` points in
/// both directions. Boundary offsets are direction-sensitive: an offset
/// landing exactly on a segment boundary resolves to the start of the
/// following segment when used as a range *start* and to the end of the
/// preceding segment when used as a range *end*, so ranges anchor tightly to
/// the text they span.
#[derive(Debug)]
pub struct SegmentMap {
    starts: Vec<usize>,
    lens: Vec<usize>,
    flattened: String,
    table: CharTable,
}

impl SegmentMap {
    /// Build the table from an ordered segment snapshot.
    pub fn new(segments: &[String]) -> Self {
        let mut starts = Vec::with_capacity(segments.len());
        let mut lens = Vec::with_capacity(segments.len());
        let mut flattened = String::new();
        let mut total = 0usize;
        for seg in segments {
            starts.push(total);
            let len = seg.chars().count();
            lens.push(len);
            total += len;
            flattened.push_str(seg);
        }
        let table = CharTable::new(&flattened);
        Self {
            starts,
            lens,
            flattened,
            table,
        }
    }

    /// The flattened text of the snapshot.
    pub fn flattened(&self) -> &str {
        &self.flattened
    }

    /// Total character count of the flattened text.
    pub fn total_chars(&self) -> usize {
        self.table.char_count()
    }

    /// Number of segments in the snapshot.
    pub fn segment_count(&self) -> usize {
        self.lens.len()
    }

    pub(crate) fn byte_to_char(&self, byte_offset: usize) -> usize {
        self.table.byte_to_char(byte_offset)
    }

    /// Resolve a flat offset to a point suitable as a range start. Boundary
    /// offsets land at the start of the following segment. Returns `None` for
    /// an empty snapshot; offsets past the end clamp to the final position.
    pub fn start_point(&self, char_offset: usize) -> Option<SurfacePoint> {
        if self.lens.is_empty() {
            return None;
        }
        let idx = self.starts.partition_point(|&s| s <= char_offset);
        let segment = idx.saturating_sub(1);
        let offset = (char_offset - self.starts[segment]).min(self.lens[segment]);
        Some(SurfacePoint::new(segment, offset))
    }

    /// Resolve a flat offset to a point suitable as a range end. Boundary
    /// offsets land at the end of the preceding segment. Returns `None` for
    /// an empty snapshot; offsets past the end clamp to the final position.
    pub fn end_point(&self, char_offset: usize) -> Option<SurfacePoint> {
        if self.lens.is_empty() {
            return None;
        }
        if char_offset == 0 {
            return Some(SurfacePoint::new(0, 0));
        }
        let idx = self.starts.partition_point(|&s| s < char_offset);
        let segment = idx.saturating_sub(1);
        let offset = (char_offset - self.starts[segment]).min(self.lens[segment]);
        Some(SurfacePoint::new(segment, offset))
    }

    /// Flat character offset of `point`, or `None` if the point does not
    /// reference an existing position in the snapshot.
    pub fn offset_of(&self, point: SurfacePoint) -> Option<usize> {
        let len = *self.lens.get(point.segment)?;
        if point.offset > len {
            return None;
        }
        Some(self.starts[point.segment] + point.offset)
    }

    /// Text spanned by `range`, or `None` if either endpoint is invalid or
    /// the endpoints are out of order.
    pub fn text_in_range(&self, range: SurfaceRange) -> Option<String> {
        let start = self.offset_of(range.start)?;
        let end = self.offset_of(range.end)?;
        if start > end {
            return None;
        }
        let start_byte = self.table.char_to_byte(start);
        let end_byte = self.table.char_to_byte(end);
        self.flattened.get(start_byte..end_byte).map(str::to_string)
    }
}

/// A located occurrence of a target snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located {
    /// Surface-addressed endpoints of the occurrence. The range may span
    /// adjacent segments.
    pub range: SurfaceRange,
    /// Inclusive start character offset in the flattened text.
    pub start: usize,
    /// Exclusive end character offset in the flattened text.
    pub end: usize,
    /// Zero-based line of the match start.
    pub line: usize,
}

/// Find the first exact occurrence of `needle` in the flattened text of
/// `segments`.
///
/// First occurrence wins; there is no further disambiguation. Returns `None`
/// for an empty needle or when no occurrence exists. Performs no mutation.
pub fn locate(segments: &[String], needle: &str) -> Option<Located> {
    locate_in(&SegmentMap::new(segments), needle)
}

/// [`locate`] against a prebuilt [`SegmentMap`], for callers that already
/// hold a snapshot table for the same operation.
pub fn locate_in(map: &SegmentMap, needle: &str) -> Option<Located> {
    if needle.is_empty() {
        return None;
    }

    let re = match Regex::new(&regex::escape(needle)) {
        Ok(re) => re,
        Err(err) => {
            warn!(%err, "failed to compile location pattern");
            return None;
        }
    };

    let m = re.find(map.flattened())?;
    let start = map.byte_to_char(m.start());
    let end = map.byte_to_char(m.end());
    let range = SurfaceRange::new(map.start_point(start)?, map.end_point(end)?);
    let line = LineIndex::from_text(map.flattened()).line_of_char(start);

    Some(Located {
        range,
        start,
        end,
        line,
    })
}
