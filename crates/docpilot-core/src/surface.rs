//! Abstract editable surface.
//!
//! The engine never owns a document model of its own. It drives a host-provided
//! *surface*: an interactive, user-editable rendering of the document that may
//! internally split one logical text into several adjacent text-bearing
//! segments (formatting runs, links, headings). This module defines the
//! contract the engine needs from such a surface:
//!
//! - a point-in-time snapshot of the ordered segments
//! - a ranged delete-and-insert primitive addressed by `(segment, offset)`
//! - wholesale text replacement
//! - selection read/write with a collapse-to-end escape hatch
//!
//! All offsets are **character offsets** (Unicode scalar values), never bytes.
//!
//! [`SegmentedBuffer`] is an in-memory reference implementation, used by hosts
//! that have no native surface and by this crate's tests.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position inside the surface: a segment index plus a character offset
/// within that segment.
///
/// Points order first by segment, then by offset, which matches the flattened
/// document order because segments are adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfacePoint {
    /// Zero-based index of the text-bearing segment.
    pub segment: usize,
    /// Character offset within the segment (`0..=segment_len`).
    pub offset: usize,
}

impl SurfacePoint {
    /// Create a new surface point.
    pub fn new(segment: usize, offset: usize) -> Self {
        Self { segment, offset }
    }
}

/// A half-open range between two surface points (`start <= end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceRange {
    /// Inclusive start point.
    pub start: SurfacePoint,
    /// Exclusive end point.
    pub end: SurfacePoint,
}

impl SurfaceRange {
    /// Create a new range.
    pub fn new(start: SurfacePoint, end: SurfacePoint) -> Self {
        Self { start, end }
    }

    /// Create a collapsed (caret) range at `point`.
    pub fn collapsed(point: SurfacePoint) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Returns `true` if the range spans no text.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Errors returned by surface mutation and selection primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    /// The point does not reference an existing position in the surface.
    InvalidPoint(SurfacePoint),
    /// The range endpoints are out of order or reference missing positions.
    InvalidRange {
        /// Offending range start.
        start: SurfacePoint,
        /// Offending range end.
        end: SurfacePoint,
    },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPoint(p) => {
                write!(f, "invalid point: segment {} offset {}", p.segment, p.offset)
            }
            Self::InvalidRange { start, end } => write!(
                f,
                "invalid range: segment {} offset {} .. segment {} offset {}",
                start.segment, start.offset, end.segment, end.offset
            ),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// The editable surface driven by the engine.
///
/// Implementations wrap whatever the host renders (a DOM `contenteditable`
/// bridge, a native text view, [`SegmentedBuffer`]). The engine treats the
/// surface as partially observable: it re-reads the segment snapshot before
/// every operation and never caches offsets across mutations.
pub trait TextSurface {
    /// Ordered snapshot of the text-bearing segments, leaves in document
    /// order. Rebuilt by the caller on every operation; implementations must
    /// not return stale content.
    fn segments(&self) -> Vec<String>;

    /// Flattened plain text of the whole surface.
    fn text(&self) -> String {
        self.segments().concat()
    }

    /// Delete the text spanned by `range` and insert `text` in its place.
    ///
    /// On success returns the point immediately **after** the inserted text,
    /// suitable for collapsing a caret behind a replacement. A malformed
    /// range is rejected with [`SurfaceError`] and the surface is left
    /// unchanged.
    fn replace_range(&mut self, range: SurfaceRange, text: &str) -> Result<SurfacePoint, SurfaceError>;

    /// Replace the entire surface content with `text`.
    ///
    /// Afterwards the surface holds at most one segment and any previous
    /// selection is gone.
    fn set_text(&mut self, text: &str);

    /// The current selection, if any.
    fn selection(&self) -> Option<SurfaceRange>;

    /// Text currently spanned by the selection, if any.
    ///
    /// The default resolves the selection against the segment snapshot.
    /// Implementations with a native notion of selected text may override it;
    /// the engine trusts this over its own flattening when checking whether a
    /// selection matches a suggestion target.
    fn selected_text(&self) -> Option<String> {
        let selection = self.selection()?;
        crate::locate::SegmentMap::new(&self.segments()).text_in_range(selection)
    }

    /// Set the selection. Both endpoints must reference existing positions
    /// and be in order.
    fn set_selection(&mut self, range: SurfaceRange) -> Result<(), SurfaceError>;

    /// Collapse the cursor to the very end of the surface (or clear the
    /// selection entirely if the surface is empty). Never fails.
    fn collapse_selection_to_end(&mut self);
}

/// Byte offset of `char_offset` within `s`, or `None` past the end.
pub(crate) fn byte_of_char(s: &str, char_offset: usize) -> Option<usize> {
    s.char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(s.len()))
        .nth(char_offset)
}

/// In-memory segmented surface.
///
/// Keeps an ordered list of text segments and a selection, with the same
/// observable behavior the engine expects from a rich-text view: text may be
/// split across segment boundaries, ranged replacement may span segments, and
/// mutations invalidate the stored selection.
#[derive(Debug, Clone, Default)]
pub struct SegmentedBuffer {
    segments: Vec<String>,
    selection: Option<SurfaceRange>,
}

impl SegmentedBuffer {
    /// Create a buffer holding `text` as a single segment (or no segments if
    /// `text` is empty).
    pub fn new(text: &str) -> Self {
        let segments = if text.is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        };
        Self {
            segments,
            selection: None,
        }
    }

    /// Create a buffer with an explicit segment layout. Empty segments are
    /// kept as given.
    pub fn with_segments<I, T>(segments: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            selection: None,
        }
    }

    /// Number of segments currently in the buffer.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Split the segment at `segment` into two at `offset`, simulating a
    /// formatting boundary being introduced mid-text. The flattened text is
    /// unchanged; the stored selection is dropped because its points may no
    /// longer address the same text.
    pub fn split_segment(&mut self, segment: usize, offset: usize) -> Result<(), SurfaceError> {
        let seg = self
            .segments
            .get(segment)
            .ok_or(SurfaceError::InvalidPoint(SurfacePoint::new(segment, offset)))?;
        let byte = byte_of_char(seg, offset)
            .ok_or(SurfaceError::InvalidPoint(SurfacePoint::new(segment, offset)))?;
        let tail = self.segments[segment].split_off(byte);
        self.segments.insert(segment + 1, tail);
        self.selection = None;
        Ok(())
    }

    fn check_point(&self, point: SurfacePoint) -> Result<(), SurfaceError> {
        let seg = self
            .segments
            .get(point.segment)
            .ok_or(SurfaceError::InvalidPoint(point))?;
        if point.offset > seg.chars().count() {
            return Err(SurfaceError::InvalidPoint(point));
        }
        Ok(())
    }
}

impl TextSurface for SegmentedBuffer {
    fn segments(&self) -> Vec<String> {
        self.segments.clone()
    }

    fn replace_range(&mut self, range: SurfaceRange, text: &str) -> Result<SurfacePoint, SurfaceError> {
        self.check_point(range.start)?;
        self.check_point(range.end)?;
        if range.start > range.end {
            return Err(SurfaceError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }

        if range.start.segment == range.end.segment {
            let seg = &mut self.segments[range.start.segment];
            let start_byte = byte_of_char(seg, range.start.offset)
                .ok_or(SurfaceError::InvalidPoint(range.start))?;
            let end_byte = byte_of_char(seg, range.end.offset)
                .ok_or(SurfaceError::InvalidPoint(range.end))?;
            seg.replace_range(start_byte..end_byte, text);
        } else {
            let end_seg = &self.segments[range.end.segment];
            let tail_byte = byte_of_char(end_seg, range.end.offset)
                .ok_or(SurfaceError::InvalidPoint(range.end))?;
            let tail = end_seg[tail_byte..].to_string();

            let start_seg = &mut self.segments[range.start.segment];
            let start_byte = byte_of_char(start_seg, range.start.offset)
                .ok_or(SurfaceError::InvalidPoint(range.start))?;
            start_seg.truncate(start_byte);
            start_seg.push_str(text);

            self.segments
                .drain(range.start.segment + 1..=range.end.segment);
            if !tail.is_empty() {
                self.segments.insert(range.start.segment + 1, tail);
            }
        }

        self.selection = None;
        Ok(SurfacePoint::new(
            range.start.segment,
            range.start.offset + text.chars().count(),
        ))
    }

    fn set_text(&mut self, text: &str) {
        self.segments = if text.is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        };
        self.selection = None;
    }

    fn selection(&self) -> Option<SurfaceRange> {
        self.selection
    }

    fn set_selection(&mut self, range: SurfaceRange) -> Result<(), SurfaceError> {
        self.check_point(range.start)?;
        self.check_point(range.end)?;
        if range.start > range.end {
            return Err(SurfaceError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        self.selection = Some(range);
        Ok(())
    }

    fn collapse_selection_to_end(&mut self) {
        self.selection = match self.segments.last() {
            Some(last) => {
                let point = SurfacePoint::new(self.segments.len() - 1, last.chars().count());
                Some(SurfaceRange::collapsed(point))
            }
            None => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_single_segment() {
        let buf = SegmentedBuffer::new("Hello, World!");
        assert_eq!(buf.segment_count(), 1);
        assert_eq!(buf.text(), "Hello, World!");
    }

    #[test]
    fn test_empty_buffer_has_no_segments() {
        let buf = SegmentedBuffer::new("");
        assert_eq!(buf.segment_count(), 0);
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_replace_within_segment() {
        let mut buf = SegmentedBuffer::new("Hello world");
        let range = SurfaceRange::new(SurfacePoint::new(0, 6), SurfacePoint::new(0, 11));
        let after = buf.replace_range(range, "there").unwrap();
        assert_eq!(buf.text(), "Hello there");
        assert_eq!(after, SurfacePoint::new(0, 11));
    }

    #[test]
    fn test_replace_across_segments() {
        let mut buf = SegmentedBuffer::with_segments(["Hello ", "wor", "ld!"]);
        // "wor" starts at segment 1 offset 0; "ld" ends at segment 2 offset 2.
        let range = SurfaceRange::new(SurfacePoint::new(1, 0), SurfacePoint::new(2, 2));
        let after = buf.replace_range(range, "Rust").unwrap();
        assert_eq!(buf.text(), "Hello Rust!");
        assert_eq!(after, SurfacePoint::new(1, 4));
    }

    #[test]
    fn test_replace_across_segments_drops_middle() {
        let mut buf = SegmentedBuffer::with_segments(["ab", "cd", "ef", "gh"]);
        let range = SurfaceRange::new(SurfacePoint::new(0, 1), SurfacePoint::new(3, 1));
        buf.replace_range(range, "-").unwrap();
        assert_eq!(buf.text(), "a-h");
    }

    #[test]
    fn test_replace_rejects_out_of_order_range() {
        let mut buf = SegmentedBuffer::with_segments(["ab", "cd"]);
        let range = SurfaceRange::new(SurfacePoint::new(1, 1), SurfacePoint::new(0, 1));
        let err = buf.replace_range(range, "x").unwrap_err();
        assert!(matches!(err, SurfaceError::InvalidRange { .. }));
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn test_replace_rejects_bad_point() {
        let mut buf = SegmentedBuffer::new("abc");
        let range = SurfaceRange::new(SurfacePoint::new(0, 0), SurfacePoint::new(0, 99));
        assert!(buf.replace_range(range, "x").is_err());
        assert_eq!(buf.text(), "abc");
    }

    #[test]
    fn test_replace_utf8() {
        let mut buf = SegmentedBuffer::new("héllo wörld");
        let range = SurfaceRange::new(SurfacePoint::new(0, 6), SurfacePoint::new(0, 11));
        buf.replace_range(range, "земля").unwrap();
        assert_eq!(buf.text(), "héllo земля");
    }

    #[test]
    fn test_split_segment_preserves_text() {
        let mut buf = SegmentedBuffer::new("Hello world");
        buf.split_segment(0, 5).unwrap();
        assert_eq!(buf.segment_count(), 2);
        assert_eq!(buf.segments(), vec!["Hello".to_string(), " world".to_string()]);
        assert_eq!(buf.text(), "Hello world");
    }

    #[test]
    fn test_selection_roundtrip_and_invalidation() {
        let mut buf = SegmentedBuffer::new("Hello world");
        let range = SurfaceRange::new(SurfacePoint::new(0, 0), SurfacePoint::new(0, 5));
        buf.set_selection(range).unwrap();
        assert_eq!(buf.selection(), Some(range));

        buf.replace_range(
            SurfaceRange::new(SurfacePoint::new(0, 6), SurfacePoint::new(0, 11)),
            "there",
        )
        .unwrap();
        assert_eq!(buf.selection(), None);
    }

    #[test]
    fn test_collapse_to_end() {
        let mut buf = SegmentedBuffer::with_segments(["ab", "cde"]);
        buf.collapse_selection_to_end();
        assert_eq!(
            buf.selection(),
            Some(SurfaceRange::collapsed(SurfacePoint::new(1, 3)))
        );

        let mut empty = SegmentedBuffer::new("");
        empty.collapse_selection_to_end();
        assert_eq!(empty.selection(), None);
    }

    #[test]
    fn test_set_text_resets_segments() {
        let mut buf = SegmentedBuffer::with_segments(["a", "b", "c"]);
        buf.set_text("fresh");
        assert_eq!(buf.segment_count(), 1);
        assert_eq!(buf.text(), "fresh");
        assert_eq!(buf.selection(), None);
    }
}
