//! Selection capture and restoration.
//!
//! A selection is only meaningful while the positions it references still
//! exist in the surface, so captures are pure, serializable descriptors — a
//! pair of structural points plus their character offsets from the document
//! root at capture time — never live references into mutable state. A
//! descriptor is validated lazily, at the moment it is about to be used, and
//! a stale one degrades to a clamped caret instead of failing the caller.

use serde::{Deserialize, Serialize};
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::locate::SegmentMap;
use crate::surface::{SurfaceRange, TextSurface};

/// Pure capture of a `(start, end)` selection within the surface.
///
/// Holds the segment-addressed range plus the flat character offsets both
/// endpoints had when captured. The offsets double as a staleness check (a
/// surviving point that no longer sits at its captured offset means the
/// surface mutated underneath) and as the clamp target when restoration has
/// to fall back to a caret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionDescriptor {
    range: SurfaceRange,
    start_offset: usize,
    end_offset: usize,
}

impl SelectionDescriptor {
    /// The captured segment-addressed range.
    pub fn range(&self) -> SurfaceRange {
        self.range
    }

    /// Flat character offset of the selection start at capture time.
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// Flat character offset of the selection end at capture time.
    pub fn end_offset(&self) -> usize {
        self.end_offset
    }

    /// Returns `true` if the descriptor still addresses the same positions
    /// in the given snapshot.
    pub fn is_current(&self, map: &SegmentMap) -> bool {
        map.offset_of(self.range.start) == Some(self.start_offset)
            && map.offset_of(self.range.end) == Some(self.end_offset)
    }

    /// Text the descriptor spans in the given snapshot, or `None` if either
    /// endpoint no longer resolves.
    pub fn spanned_text(&self, map: &SegmentMap) -> Option<String> {
        map.text_in_range(self.range)
    }
}

/// Tracks the most recently captured selection.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    captured: Option<SelectionDescriptor>,
}

impl SelectionTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the surface's current selection if and only if it lies
    /// entirely within the surface. The capture replaces any previously
    /// remembered descriptor.
    pub fn capture<S: TextSurface>(&mut self, surface: &S) -> Option<SelectionDescriptor> {
        let selection = surface.selection()?;
        let map = SegmentMap::new(&surface.segments());
        let start_offset = map.offset_of(selection.start)?;
        let end_offset = map.offset_of(selection.end)?;
        if start_offset > end_offset {
            return None;
        }
        let descriptor = SelectionDescriptor {
            range: selection,
            start_offset,
            end_offset,
        };
        self.captured = Some(descriptor.clone());
        Some(descriptor)
    }

    /// The most recently captured descriptor, if it has not been consumed.
    pub fn captured(&self) -> Option<&SelectionDescriptor> {
        self.captured.as_ref()
    }

    /// Drop the remembered descriptor.
    pub fn invalidate(&mut self) {
        self.captured = None;
    }
}

/// Best-effort restoration of a captured selection. Never fails.
///
/// If the descriptor still addresses its captured positions, the selection is
/// re-established exactly. On any inconsistency the captured start offset is
/// clamped into the current text, snapped back to a grapheme-cluster
/// boundary, and the cursor collapses there; if even that position cannot be
/// addressed, the cursor collapses to the end of the surface.
pub fn restore_selection<S: TextSurface>(surface: &mut S, descriptor: &SelectionDescriptor) {
    let map = SegmentMap::new(&surface.segments());
    if descriptor.is_current(&map) && surface.set_selection(descriptor.range()).is_ok() {
        return;
    }

    debug!(
        offset = descriptor.start_offset(),
        "selection descriptor stale; clamping cursor"
    );
    let clamped = descriptor.start_offset().min(map.total_chars());
    let snapped = snap_to_grapheme(map.flattened(), clamped);
    let restored = map
        .end_point(snapped)
        .map(SurfaceRange::collapsed)
        .is_some_and(|caret| surface.set_selection(caret).is_ok());
    if !restored {
        surface.collapse_selection_to_end();
    }
}

/// Largest grapheme-cluster boundary at or before `char_offset`.
fn snap_to_grapheme(text: &str, char_offset: usize) -> usize {
    let mut boundary = 0;
    for grapheme in text.graphemes(true) {
        let next = boundary + grapheme.chars().count();
        if next > char_offset {
            return boundary;
        }
        boundary = next;
    }
    boundary
}
